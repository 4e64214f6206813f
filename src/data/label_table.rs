use std::fs;
use std::path::Path;
use anyhow::Context;
use regex::Regex;

/// COCO dataset class names, index = class index.
pub const COCO_CLASSES: [&str; 80] = [
    "person",
    "bicycle",
    "car",
    "motorcycle",
    "airplane",
    "bus",
    "train",
    "truck",
    "boat",
    "traffic light",
    "fire hydrant",
    "stop sign",
    "parking meter",
    "bench",
    "bird",
    "cat",
    "dog",
    "horse",
    "sheep",
    "cow",
    "elephant",
    "bear",
    "zebra",
    "giraffe",
    "backpack",
    "umbrella",
    "handbag",
    "tie",
    "suitcase",
    "frisbee",
    "skis",
    "snowboard",
    "sports ball",
    "kite",
    "baseball bat",
    "baseball glove",
    "skateboard",
    "surfboard",
    "tennis racket",
    "bottle",
    "wine glass",
    "cup",
    "fork",
    "knife",
    "spoon",
    "bowl",
    "banana",
    "apple",
    "sandwich",
    "orange",
    "broccoli",
    "carrot",
    "hot dog",
    "pizza",
    "donut",
    "cake",
    "chair",
    "couch",
    "potted plant",
    "bed",
    "dining table",
    "toilet",
    "tv",
    "laptop",
    "mouse",
    "remote",
    "keyboard",
    "cell phone",
    "microwave",
    "oven",
    "toaster",
    "sink",
    "refrigerator",
    "book",
    "clock",
    "vase",
    "scissors",
    "teddy bear",
    "hair drier",
    "toothbrush",
];

pub fn coco_names() -> Vec<String> {
    COCO_CLASSES.iter().map(|name| name.to_string()).collect()
}

/// Parses the class names dictionary exported in model metadata.
///
/// String format: `{0: 'person', 1: 'bicycle', 2: 'sports ball', ..., 27: "yellow_lady's_slipper"}`
pub fn parse_names_metadata(metadata: &str) -> anyhow::Result<Vec<String>> {
    let re = Regex::new(r#"(['"])([-()\w '"]+)(['"])"#)?;
    let mut names = vec![];
    for (_, [_, name, _]) in re.captures_iter(metadata).map(|x| x.extract()) {
        names.push(name.to_string());
    }
    Ok(names)
}

/// One class name per line, blank lines skipped.
pub fn parse_names_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads a label table from disk, accepting either the line format or the metadata dictionary.
pub fn load_labels<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read label table {}", path.display()))?;

    let names = if text.trim_start().starts_with('{') {
        parse_names_metadata(&text)?
    } else {
        parse_names_lines(&text)
    };

    if names.is_empty() {
        anyhow::bail!("Label table {} holds no class names", path.display());
    }
    log::debug!("Loaded {} class names from {}", names.len(), path.display());
    Ok(names)
}

/// Stand-in names (`# 0`, `# 1`, ...) for models shipped without a label table.
pub fn placeholder_names(n: usize) -> Vec<String> {
    (0..n).map(|x| format!("# {}", x)).collect::<Vec<String>>()
}

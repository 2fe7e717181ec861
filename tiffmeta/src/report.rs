use std::io::{Read, Seek, Write};

use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::image_file::ImageFile;
use crate::summary::summarize;

/// Verbose per-tag listing of one file.
pub fn write_text<T: Read + Seek, W: Write>(image: &mut ImageFile<T>, out: &mut W) -> Result<()> {
    writeln!(out, "=== {} ===", image.name())?;
    let (width, height) = image.size();
    writeln!(out, "size: ({}, {})", width, height)?;
    writeln!(out, "mode: {}", image.mode())?;
    writeln!(out, "info: {}", image.info())?;
    for (key, value) in image.extract_tags() {
        writeln!(out, "{} -> {}", key, value)?;
    }
    Ok(())
}

/// Machine readable summary: `file`, `size`, `mode`, `info`, `tags`.
pub fn summary<T: Read + Seek>(image: &mut ImageFile<T>) -> Result<Value> {
    let mut info = Map::new();
    for (key, value) in image.info().iter() {
        info.insert(key.clone(), serde_json::to_value(summarize(value))?);
    }
    let mut tags = Map::new();
    for (key, value) in image.extract_tags() {
        tags.insert(key, serde_json::to_value(value)?);
    }
    let (width, height) = image.size();
    Ok(json!({
        "file": image.name(),
        "size": [width, height],
        "mode": image.mode(),
        "info": info,
        "tags": tags,
    }))
}

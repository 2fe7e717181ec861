use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use image::{ColorType, ImageDecoder, ImageReader};
use log::{debug, warn};

use tiff::decoder::Decoder;
use tiff::tags::{IfdPointer, Tag, Type};

use crate::error::{Result, TiffError};
use crate::icc::IccHeader;
use crate::mode::Layout;
use crate::summary::{summarize, DisplayValue};
use crate::tags::{self, tag_name};
use crate::value::{from_tiff, TagValue};

/// Container level metadata, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Info {
    fields: Vec<(String, TagValue)>,
}

impl Info {
    pub fn insert(&mut self, key: &str, value: TagValue) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.fields.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&TagValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, TagValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|(k, v)| format!("'{}': {}", k, v.repr()))
            .collect();
        write!(f, "{{{}}}", fields.join(", "))
    }
}

struct TiffSource<T: Read + Seek> {
    decoder: Decoder<T>,
    fields: Vec<(u16, Type)>,
}

impl<T: Read + Seek> TiffSource<T> {
    fn new(input: T) -> Result<Self> {
        let mut decoder = Decoder::new(input)?;
        let fields = decoder
            .image_ifd()
            .directory()
            .iter()
            .map(|(tag, entry)| (tag.to_u16(), entry.field_type()))
            .collect();
        Ok(TiffSource { decoder, fields })
    }

    fn field_type(&self, tag: u16) -> Option<Type> {
        self.fields
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, field_type)| *field_type)
    }

    fn read_entry(&mut self, tag: u16, field_type: Type) -> Result<TagValue> {
        let value = self.decoder.get_tag(Tag::from_u16_exhaustive(tag))?;
        Ok(from_tiff(value, field_type))
    }

    fn value(&mut self, tag: u16) -> Option<Result<TagValue>> {
        let field_type = self.field_type(tag)?;
        Some(self.read_entry(tag, field_type))
    }

    fn int_or(&mut self, tag: u16, default: i64) -> Result<i64> {
        match self.value(tag) {
            None => Ok(default),
            Some(value) => value?.as_int().ok_or_else(|| not_integer(tag)),
        }
    }

    fn ints_or(&mut self, tag: u16, default: Vec<i64>) -> Result<Vec<i64>> {
        match self.value(tag) {
            None => Ok(default),
            Some(value) => value?.as_ints().ok_or_else(|| not_integer(tag)),
        }
    }

    fn read_tag(&mut self, tag: u16, field_type: Type) -> Result<TagValue> {
        if tags::POINTER_TAGS.contains(&tag) {
            let pointer = self
                .decoder
                .get_tag(Tag::from_u16_exhaustive(tag))?
                .into_ifd_pointer()?;
            return self.read_sub_directory(pointer);
        }
        let value = self.read_entry(tag, field_type)?;
        let scalar = !matches!(
            value,
            TagValue::Bytes(_) | TagValue::Ascii(_) | TagValue::List(_)
        );
        if scalar && tags::is_variable_length(tag) {
            return Ok(TagValue::List(vec![value]));
        }
        Ok(value)
    }

    // nested pointers inside the sub directory stay plain offsets
    fn read_sub_directory(&mut self, pointer: IfdPointer) -> Result<TagValue> {
        let directory = self.decoder.read_directory(pointer)?;
        let fields: Vec<(Tag, Type)> = directory
            .iter()
            .map(|(tag, entry)| (tag, entry.field_type()))
            .collect();
        let mut ifd = self.decoder.read_directory_tags(&directory);
        let mut map = BTreeMap::new();
        for (tag, field_type) in fields {
            let value = match ifd.get_tag(tag) {
                Ok(value) => from_tiff(value, field_type),
                Err(e) => TagValue::Ascii(format!("ERROR {}", e)),
            };
            map.insert(tag.to_u16(), value);
        }
        Ok(TagValue::Map(map))
    }
}

fn not_integer(tag: u16) -> TiffError {
    TiffError::Directory(format!("{} is not an integer", tag_name(tag)))
}

fn is_tiff_header(prefix: &[u8]) -> bool {
    matches!(
        prefix,
        [b'I', b'I', 42 | 43, 0, ..] | [b'M', b'M', 0, 42 | 43, ..]
    )
}

/// One opened input file. TIFF files keep their reader so tags can be
/// decoded on demand; other raster formats only carry size, mode and info.
pub struct ImageFile<T: Read + Seek> {
    name: String,
    size: (u32, u32),
    mode: String,
    info: Info,
    tiff: Option<TiffSource<T>>,
}

impl ImageFile<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let file = File::open(path)?;
        ImageFile::from_reader(BufReader::new(file), name)
    }
}

impl<T: Read + Seek> ImageFile<T> {
    pub fn from_reader(mut input: T, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let mut prefix = Vec::with_capacity(4);
        (&mut input).take(4).read_to_end(&mut prefix)?;
        input.seek(SeekFrom::Start(0))?;
        if is_tiff_header(&prefix) {
            Self::open_tiff(input, name)
        } else {
            Self::open_raster(input, name)
        }
    }

    fn open_tiff(input: T, name: String) -> Result<Self> {
        let mut source = TiffSource::new(input)?;
        let size = source.decoder.dimensions()?;
        let layout = Layout {
            photometric: source.int_or(tags::PHOTOMETRIC_INTERPRETATION, 0)?,
            samples_per_pixel: source.int_or(tags::SAMPLES_PER_PIXEL, 1)?,
            bits_per_sample: source.ints_or(tags::BITS_PER_SAMPLE, vec![1])?,
            sample_format: source
                .ints_or(tags::SAMPLE_FORMAT, vec![1])?
                .first()
                .copied()
                .unwrap_or(1),
            extra_samples: source.ints_or(tags::EXTRA_SAMPLES, Vec::new())?,
            byte_order: source.decoder.byte_order(),
        };
        let mode = layout.mode()?.to_string();
        let info = tiff_info(&mut source);
        debug!(
            "{} tiff {}x{} mode {} with {} tags",
            name,
            size.0,
            size.1,
            mode,
            source.fields.len()
        );
        Ok(ImageFile {
            name,
            size,
            mode,
            info,
            tiff: Some(source),
        })
    }

    fn open_raster(input: T, name: String) -> Result<Self> {
        let reader = ImageReader::new(BufReader::new(input)).with_guessed_format()?;
        let format = reader
            .format()
            .ok_or_else(|| TiffError::Unidentified(name.clone()))?;
        let mut decoder = reader.into_decoder()?;
        let size = decoder.dimensions();
        let mode = raster_mode(decoder.color_type())?.to_string();
        let mut info = Info::default();
        if let Some(profile) = decoder.icc_profile()? {
            info.insert("icc_profile", TagValue::Bytes(profile));
        }
        debug!("{} {:?} {}x{} mode {}", name, format, size.0, size.1, mode);
        Ok(ImageFile {
            name,
            size,
            mode,
            info,
            tiff: None,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn mode(&self) -> &str {
        self.mode.as_str()
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn is_tiff(&self) -> bool {
        self.tiff.is_some()
    }

    /// Raw value of one tag of the first directory, `None` when absent.
    pub fn tag_value(&mut self, tag: u16) -> Option<Result<TagValue>> {
        let source = self.tiff.as_mut()?;
        let field_type = source.field_type(tag)?;
        Some(source.read_tag(tag, field_type))
    }

    /// Every tag of the first directory in ascending order, keyed
    /// `"<number>:<name>"`. A tag that fails to decode is reported inline
    /// as `ERROR <message>` and does not stop the others.
    pub fn extract_tags(&mut self) -> Vec<(String, DisplayValue)> {
        let Some(source) = self.tiff.as_mut() else {
            return Vec::new();
        };
        source
            .fields
            .clone()
            .into_iter()
            .map(|(tag, field_type)| {
                let key = format!("{}:{}", tag, tag_name(tag));
                let value = match source.read_tag(tag, field_type) {
                    Ok(value) => summarize(&value),
                    Err(e) => {
                        warn!("{}: tag {} unreadable: {}", self.name, key, e);
                        DisplayValue::Text(format!("ERROR {}", e))
                    }
                };
                (key, value)
            })
            .collect()
    }
}

fn tiff_info<T: Read + Seek>(source: &mut TiffSource<T>) -> Info {
    let mut info = Info::default();
    let compression = match source.int_or(tags::COMPRESSION, 1) {
        Ok(code) => tags::compression_name(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string()),
        Err(e) => {
            warn!("compression unreadable: {}", e);
            "raw".to_string()
        }
    };
    info.insert("compression", TagValue::Ascii(compression));

    let xres = source.value(tags::X_RESOLUTION).and_then(|v| v.ok());
    let yres = source.value(tags::Y_RESOLUTION).and_then(|v| v.ok());
    if let (Some(x), Some(y)) = (
        xres.as_ref().and_then(TagValue::as_rational),
        yres.as_ref().and_then(TagValue::as_rational),
    ) {
        let pair = TagValue::List(vec![TagValue::Rational(x), TagValue::Rational(y)]);
        let unit = source
            .value(tags::RESOLUTION_UNIT)
            .and_then(|v| v.ok())
            .and_then(|v| v.as_int());
        match unit {
            Some(2) => info.insert("dpi", pair),
            Some(3) => info.insert(
                "dpi",
                TagValue::List(vec![
                    TagValue::Float(x.to_f64() * 2.54),
                    TagValue::Float(y.to_f64() * 2.54),
                ]),
            ),
            None => {
                info.insert("dpi", pair.clone());
                info.insert("resolution", pair);
            }
            Some(_) => info.insert("resolution", pair),
        }
    }

    for (tag, key) in [
        (tags::ICC_PROFILE, "icc_profile"),
        (tags::XMP, "xmp"),
        (tags::PHOTOSHOP, "photoshop"),
    ] {
        match source.value(tag) {
            Some(Ok(TagValue::Bytes(data))) => {
                if tag == tags::ICC_PROFILE {
                    match IccHeader::parse(&data) {
                        Ok(header) => debug!("embedded icc profile {}", header),
                        Err(e) => warn!("embedded icc profile: {}", e),
                    }
                }
                info.insert(key, TagValue::Bytes(data));
            }
            Some(Ok(other)) => debug!("{} has unexpected shape {:?}", key, other),
            Some(Err(e)) => warn!("{} unreadable: {}", key, e),
            None => {}
        }
    }
    info
}

fn raster_mode(color: ColorType) -> Result<&'static str> {
    let mode = match color {
        ColorType::L8 => "L",
        ColorType::La8 | ColorType::La16 => "LA",
        ColorType::L16 => "I;16",
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => "RGB",
        ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => "RGBA",
        other => return Err(TiffError::Mode(format!("{:?}", other))),
    };
    Ok(mode)
}

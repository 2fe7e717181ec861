use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

pub const NEW_SUBFILE_TYPE: u16 = 254;
pub const IMAGE_WIDTH: u16 = 256;
pub const IMAGE_LENGTH: u16 = 257;
pub const BITS_PER_SAMPLE: u16 = 258;
pub const COMPRESSION: u16 = 259;
pub const PHOTOMETRIC_INTERPRETATION: u16 = 262;
pub const SAMPLES_PER_PIXEL: u16 = 277;
pub const X_RESOLUTION: u16 = 282;
pub const Y_RESOLUTION: u16 = 283;
pub const RESOLUTION_UNIT: u16 = 296;
pub const SUB_IFDS: u16 = 330;
pub const EXTRA_SAMPLES: u16 = 338;
pub const SAMPLE_FORMAT: u16 = 339;
pub const XMP: u16 = 700;
pub const PHOTOSHOP: u16 = 34377;
pub const EXIF_IFD: u16 = 34665;
pub const ICC_PROFILE: u16 = 34675;
pub const GPS_IFD: u16 = 34853;

/// Tags whose value is the offset of a nested directory.
pub const POINTER_TAGS: [u16; 2] = [EXIF_IFD, GPS_IFD];

lazy_static! {
    static ref TAG_NAMES: HashMap<u16, &'static str> = {
        let mut names = HashMap::new();
        names.insert(NEW_SUBFILE_TYPE, "NewSubfileType");
        names.insert(255, "SubfileType");
        names.insert(IMAGE_WIDTH, "ImageWidth");
        names.insert(IMAGE_LENGTH, "ImageLength");
        names.insert(BITS_PER_SAMPLE, "BitsPerSample");
        names.insert(COMPRESSION, "Compression");
        names.insert(PHOTOMETRIC_INTERPRETATION, "PhotometricInterpretation");
        names.insert(263, "Threshholding");
        names.insert(264, "CellWidth");
        names.insert(265, "CellLength");
        names.insert(266, "FillOrder");
        names.insert(269, "DocumentName");
        names.insert(270, "ImageDescription");
        names.insert(271, "Make");
        names.insert(272, "Model");
        names.insert(273, "StripOffsets");
        names.insert(274, "Orientation");
        names.insert(SAMPLES_PER_PIXEL, "SamplesPerPixel");
        names.insert(278, "RowsPerStrip");
        names.insert(279, "StripByteCounts");
        names.insert(280, "MinSampleValue");
        names.insert(281, "MaxSampleValue");
        names.insert(X_RESOLUTION, "XResolution");
        names.insert(Y_RESOLUTION, "YResolution");
        names.insert(284, "PlanarConfiguration");
        names.insert(285, "PageName");
        names.insert(286, "XPosition");
        names.insert(287, "YPosition");
        names.insert(288, "FreeOffsets");
        names.insert(289, "FreeByteCounts");
        names.insert(290, "GrayResponseUnit");
        names.insert(291, "GrayResponseCurve");
        names.insert(292, "T4Options");
        names.insert(293, "T6Options");
        names.insert(RESOLUTION_UNIT, "ResolutionUnit");
        names.insert(297, "PageNumber");
        names.insert(301, "TransferFunction");
        names.insert(305, "Software");
        names.insert(306, "DateTime");
        names.insert(315, "Artist");
        names.insert(316, "HostComputer");
        names.insert(317, "Predictor");
        names.insert(318, "WhitePoint");
        names.insert(319, "PrimaryChromaticities");
        names.insert(320, "ColorMap");
        names.insert(321, "HalftoneHints");
        names.insert(322, "TileWidth");
        names.insert(323, "TileLength");
        names.insert(324, "TileOffsets");
        names.insert(325, "TileByteCounts");
        names.insert(SUB_IFDS, "SubIFDs");
        names.insert(332, "InkSet");
        names.insert(333, "InkNames");
        names.insert(334, "NumberOfInks");
        names.insert(336, "DotRange");
        names.insert(337, "TargetPrinter");
        names.insert(EXTRA_SAMPLES, "ExtraSamples");
        names.insert(SAMPLE_FORMAT, "SampleFormat");
        names.insert(340, "SMinSampleValue");
        names.insert(341, "SMaxSampleValue");
        names.insert(342, "TransferRange");
        names.insert(347, "JPEGTables");
        names.insert(512, "JPEGProc");
        names.insert(513, "JPEGInterchangeFormat");
        names.insert(514, "JPEGInterchangeFormatLength");
        names.insert(515, "JPEGRestartInterval");
        names.insert(517, "JPEGLosslessPredictors");
        names.insert(518, "JPEGPointTransforms");
        names.insert(519, "JPEGQTables");
        names.insert(520, "JPEGDCTables");
        names.insert(521, "JPEGACTables");
        names.insert(529, "YCbCrCoefficients");
        names.insert(530, "YCbCrSubSampling");
        names.insert(531, "YCbCrPositioning");
        names.insert(532, "ReferenceBlackWhite");
        names.insert(XMP, "XMP");
        names.insert(33432, "Copyright");
        names.insert(33723, "IptcNaaInfo");
        names.insert(33550, "ModelPixelScaleTag");
        names.insert(33922, "ModelTiepointTag");
        names.insert(34264, "ModelTransformationTag");
        names.insert(PHOTOSHOP, "PhotoshopInfo");
        names.insert(EXIF_IFD, "ExifIFD");
        names.insert(ICC_PROFILE, "ICCProfile");
        names.insert(34735, "GeoKeyDirectoryTag");
        names.insert(34736, "GeoDoubleParamsTag");
        names.insert(34737, "GeoAsciiParamsTag");
        names.insert(GPS_IFD, "GPSInfoIFD");
        names.insert(37724, "ImageSourceData");
        names.insert(40965, "InteroperabilityIFD");
        names.insert(42016, "ImageUniqueID");
        names.insert(50741, "MakerNoteSafety");
        names.insert(50780, "BestQualityScale");
        names.insert(50838, "ImageJMetaDataByteCounts");
        names.insert(50839, "ImageJMetaData");
        names
    };
    // known tags that hold a list of any length, these keep a one element
    // list as a tuple
    static ref VARIABLE_LENGTH: HashSet<u16> = [
        BITS_PER_SAMPLE,
        273,
        279,
        280,
        281,
        291,
        297,
        301,
        318,
        319,
        320,
        321,
        324,
        325,
        SUB_IFDS,
        336,
        EXTRA_SAMPLES,
        SAMPLE_FORMAT,
        340,
        341,
        342,
        517,
        518,
        519,
        520,
        521,
        529,
        530,
        532,
        50838,
    ]
    .into_iter()
    .collect();
    static ref COMPRESSION_NAMES: HashMap<i64, &'static str> = {
        let mut names = HashMap::new();
        names.insert(1, "raw");
        names.insert(2, "tiff_ccitt");
        names.insert(3, "group3");
        names.insert(4, "group4");
        names.insert(5, "tiff_lzw");
        names.insert(6, "tiff_jpeg");
        names.insert(7, "jpeg");
        names.insert(8, "tiff_adobe_deflate");
        names.insert(32771, "tiff_raw_16");
        names.insert(32773, "packbits");
        names.insert(32809, "tiff_thunderscan");
        names.insert(32946, "tiff_deflate");
        names.insert(34676, "tiff_sgilog");
        names.insert(34677, "tiff_sgilog24");
        names.insert(34925, "lzma");
        names.insert(50000, "zstd");
        names.insert(50001, "webp");
        names
    };
}

/// Human readable name of a tag, or the number itself when unknown.
pub fn tag_name(tag: u16) -> Cow<'static, str> {
    match TAG_NAMES.get(&tag) {
        Some(name) => Cow::Borrowed(*name),
        None => Cow::Owned(tag.to_string()),
    }
}

pub fn is_variable_length(tag: u16) -> bool {
    VARIABLE_LENGTH.contains(&tag)
}

pub fn compression_name(code: i64) -> Option<&'static str> {
    COMPRESSION_NAMES.get(&code).copied()
}

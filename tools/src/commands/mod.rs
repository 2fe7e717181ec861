pub mod embed_profile;
pub mod inspect_tiff;

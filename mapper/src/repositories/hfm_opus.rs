//! OPUS of the Hochschule für Musik Detmold (OPUS 4).
//!
//! Titles are emitted with a language attribute and are read from
//! `dc:title/#text`.

use super::opus_config;
use crate::mapping::MapperConfig;

pub const TAG: &str = "Hfm OPUS Metadata Mapper";
pub const SOURCE_ORGANIZATION: &str = "https://d-nb.info/gnd/5073685-1";
pub const TRANSFER_URL_PREFIX: &str = "https://opus.hfm-detmold.de/files/";

pub fn config() -> MapperConfig {
    opus_config(TAG, SOURCE_ORGANIZATION, TRANSFER_URL_PREFIX)
}

//! OPUS of the Westfälische Hochschule Gelsenkirchen (OPUS 4).
//!
//! Titles are emitted with a language attribute and are read from
//! `dc:title/#text`.

use super::opus_config;
use crate::mapping::MapperConfig;

pub const TAG: &str = "Whge OPUS Metadata Mapper";
pub const SOURCE_ORGANIZATION: &str = "https://d-nb.info/gnd/1022953834";
pub const TRANSFER_URL_PREFIX: &str = "https://whge.opus.hbz-nrw.de/files/";

pub fn config() -> MapperConfig {
    opus_config(TAG, SOURCE_ORGANIZATION, TRANSFER_URL_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::{SOURCE_ORGANIZATION, TAG, TRANSFER_URL_PREFIX};
    use crate::repositories::fixtures::{assert_deleted_record, assert_opus_mapper};
    use crate::repositories::Repository;

    #[test]
    fn test_whge_opus_mapper() {
        assert_opus_mapper(
            Repository::WhgeOpus,
            TAG,
            SOURCE_ORGANIZATION,
            TRANSFER_URL_PREFIX,
            "oai:opus4-whge",
        );
    }

    #[test]
    fn test_deleted_record() {
        assert_deleted_record(Repository::WhgeOpus, SOURCE_ORGANIZATION);
    }
}

//! Supported AWS regions.

use objsink_common::types::{UnsupportedValue, lookup_variant_exact};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Region the bucket lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    UsGovWest1,
    UsGovEast1,
    UsEast1,
    UsEast2,
    UsWest1,
    UsWest2,
    EuWest1,
    EuWest2,
    EuWest3,
    EuCentral1,
    EuNorth1,
    EuSouth1,
    ApEast1,
    ApSouth1,
    ApSoutheast1,
    ApSoutheast2,
    ApNortheast1,
    ApNortheast2,
    ApNortheast3,
    SaEast1,
    CnNorth1,
    CnNorthwest1,
    CaCentral1,
    MeSouth1,
    AfSouth1,
    UsIsoEast1,
    UsIsobEast1,
    UsIsoWest1,
}

impl Region {
    /// Region used when none is configured.
    pub const DEFAULT: Self = Self::UsEast1;

    pub const ALL: [Self; 28] = [
        Self::UsGovWest1,
        Self::UsGovEast1,
        Self::UsEast1,
        Self::UsEast2,
        Self::UsWest1,
        Self::UsWest2,
        Self::EuWest1,
        Self::EuWest2,
        Self::EuWest3,
        Self::EuCentral1,
        Self::EuNorth1,
        Self::EuSouth1,
        Self::ApEast1,
        Self::ApSouth1,
        Self::ApSoutheast1,
        Self::ApSoutheast2,
        Self::ApNortheast1,
        Self::ApNortheast2,
        Self::ApNortheast3,
        Self::SaEast1,
        Self::CnNorth1,
        Self::CnNorthwest1,
        Self::CaCentral1,
        Self::MeSouth1,
        Self::AfSouth1,
        Self::UsIsoEast1,
        Self::UsIsobEast1,
        Self::UsIsoWest1,
    ];

    /// Region identifier, e.g. `us-east-1`.
    pub fn name(self) -> &'static str {
        match self {
            Self::UsGovWest1 => "us-gov-west-1",
            Self::UsGovEast1 => "us-gov-east-1",
            Self::UsEast1 => "us-east-1",
            Self::UsEast2 => "us-east-2",
            Self::UsWest1 => "us-west-1",
            Self::UsWest2 => "us-west-2",
            Self::EuWest1 => "eu-west-1",
            Self::EuWest2 => "eu-west-2",
            Self::EuWest3 => "eu-west-3",
            Self::EuCentral1 => "eu-central-1",
            Self::EuNorth1 => "eu-north-1",
            Self::EuSouth1 => "eu-south-1",
            Self::ApEast1 => "ap-east-1",
            Self::ApSouth1 => "ap-south-1",
            Self::ApSoutheast1 => "ap-southeast-1",
            Self::ApSoutheast2 => "ap-southeast-2",
            Self::ApNortheast1 => "ap-northeast-1",
            Self::ApNortheast2 => "ap-northeast-2",
            Self::ApNortheast3 => "ap-northeast-3",
            Self::SaEast1 => "sa-east-1",
            Self::CnNorth1 => "cn-north-1",
            Self::CnNorthwest1 => "cn-northwest-1",
            Self::CaCentral1 => "ca-central-1",
            Self::MeSouth1 => "me-south-1",
            Self::AfSouth1 => "af-south-1",
            Self::UsIsoEast1 => "us-iso-east-1",
            Self::UsIsobEast1 => "us-isob-east-1",
            Self::UsIsoWest1 => "us-iso-west-1",
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Region {
    type Err = UnsupportedValue;

    /// Region ids are matched exactly, e.g. `US-EAST-1` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup_variant_exact(s, &Self::ALL, Self::name)
    }
}

impl TryFrom<String> for Region {
    type Error = UnsupportedValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        region.name().to_string()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names_round_trip() {
        for region in Region::ALL {
            assert_eq!(region.name().parse::<Region>(), Ok(region));
        }
    }

    #[test]
    fn unknown_region_lists_supported_names() {
        let err = "atlantis-1".parse::<Region>().unwrap_err();
        assert!(err.supported.starts_with("us-gov-west-1, us-gov-east-1, us-east-1"));
        assert!(err.to_string().contains("eu-north-1"));
    }

    #[test]
    fn region_ids_match_exactly() {
        for value in ["US-EAST-1", "Eu-West-1", " us-east-1", "us-east-1 "] {
            let err = value.parse::<Region>().unwrap_err();
            assert_eq!(err.value, value);
        }
    }

    #[test]
    fn serializes_as_identifier() {
        let json = serde_json::to_string(&Region::EuCentral1).expect("json");
        assert_eq!(json, "\"eu-central-1\"");
        let region: Region = serde_json::from_str("\"ap-south-1\"").expect("region");
        assert_eq!(region, Region::ApSouth1);
    }
}

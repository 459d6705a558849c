//! Deposit metadata document

use crate::types::CreatorEntry;
use serde::Serialize;

pub const UPLOAD_TYPE: &str = "dataset";
pub const ACCESS_RIGHT: &str = "restricted";
pub const LICENSE: &str = "CC-BY-4.0";
pub const ACCESS_CONDITIONS: &str = "Any Tara Pacific Expedition participant may request access.";
pub const COMMUNITY: &str = "tarapacific";
pub const VERSION: &str = "1";
pub const LANGUAGE: &str = "eng";

pub const ACKNOWLEDGEMENT: &str = "Special thanks to the Tara Ocean Foundation, the R/V Tara crew and the Tara Pacific Expedition \
Participants (https://doi.org/10.5281/zenodo.3777760). We are keen to thank the commitment of \
the following institutions for their financial and scientific support that made this unique Tara \
Pacific Expedition possible: CNRS, PSL, CSM, EPHE, Genoscope, CEA, Inserm, Université Côte d'Azur, \
ANR, agnès b., UNESCO-IOC, the Veolia Foundation, the Prince Albert II de Monaco Foundation, \
Région Bretagne, Billerudkorsnas, AmerisourceBergen Company, Lorient Agglomération, Oceans by \
Disney, L'Oréal, Biotherm, France Collectivités, Fonds Français pour l'Environnement Mondial (FFEM), \
Etienne Bourgois, and the Tara Ocean Foundation teams. Tara Pacific would not exist without the \
continuous support of the participating institutes. The authors also particularly thank Serge \
Planes, Denis Allemand, and the Tara Pacific consortium.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Community {
    pub identifier: String,
}

/// Body of the metadata update request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataEnvelope {
    pub metadata: DepositMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositMetadata {
    pub title: String,
    pub upload_type: String,
    pub description: String,
    pub access_right: String,
    pub license: String,
    pub access_conditions: String,
    pub communities: Vec<Community>,
    pub version: String,
    pub language: String,
    pub creators: Vec<CreatorEntry>,
    pub notes: String,
    pub references: Vec<String>,
}

impl DepositMetadata {
    /// Metadata with the consortium's fixed fields
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        creators: Vec<CreatorEntry>,
        references: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            upload_type: UPLOAD_TYPE.to_string(),
            description: description.into(),
            access_right: ACCESS_RIGHT.to_string(),
            license: LICENSE.to_string(),
            access_conditions: ACCESS_CONDITIONS.to_string(),
            communities: vec![Community {
                identifier: COMMUNITY.to_string(),
            }],
            version: VERSION.to_string(),
            language: LANGUAGE.to_string(),
            creators,
            notes: ACKNOWLEDGEMENT.to_string(),
            references,
        }
    }

    pub fn into_envelope(self) -> MetadataEnvelope {
        MetadataEnvelope { metadata: self }
    }
}

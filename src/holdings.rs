//! Holdings classification and formatting.
//!
//! The Solr document's `hol` member is a JSON-encoded array of holding
//! objects with heterogeneous shapes, so access stays permissive
//! (`serde_json::Value` plus small accessors) and the output is shaped by
//! the typed schemas.
//!
//! Each holding classifies into one of physical, electronic, Alma-digital,
//! HathiTrust, or finding-aid by its library code and finding-aid flag.
//! Reservable physical items additionally compute a reading-room request
//! URL by re-running the pairing engine over the bibliographic record.

use crate::engine::Extractor;
use crate::record::BibRecord;
use crate::rules::FieldRule;
use crate::schemas::{
    AlmaDigitalItem, ElectronicItem, FindingAidItem, FindingAids, HathiTrustItem, Holdings,
    LibLoc, PhysicalHolding, PhysicalItem, PhysicalLocation,
};
use serde_json::Value;
use url::form_urlencoded;

/// Classification of one holding entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldingKind {
    /// Barcoded items on shelves.
    Physical,
    /// Link-level electronic access.
    Electronic,
    /// Alma digital representation.
    AlmaDigital,
    /// HathiTrust volume.
    HathiTrust,
    /// Finding aid describing an archival holding.
    FindingAid,
}

fn str_of(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

fn bool_of(value: &Value, key: &str) -> bool {
    value.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn items_of(value: &Value) -> &[Value] {
    value
        .get("items")
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Classify one holding entry by library code and finding-aid flag.
#[must_use]
pub fn kind_of_holding(holding: &Value) -> HoldingKind {
    match str_of(holding, "library").as_deref() {
        Some("ALMA_DIGITAL") => HoldingKind::AlmaDigital,
        Some("HathiTrust Digital Library") => HoldingKind::HathiTrust,
        Some("ELEC") => {
            if bool_of(holding, "finding_aid") {
                HoldingKind::FindingAid
            } else {
                HoldingKind::Electronic
            }
        }
        _ => HoldingKind::Physical,
    }
}

/// Build all holdings groups for one record.
#[must_use]
pub fn build_holdings(data: &[Value], bib_id: &str, record: &BibRecord) -> Holdings {
    Holdings {
        hathi_trust_items: hathi_trust_items(data),
        alma_digital_items: alma_digital_items(data),
        electronic_items: electronic_items(data),
        finding_aids: finding_aids(data),
        physical: physical_holdings(data, bib_id, record),
    }
}

fn hathi_trust_items(data: &[Value]) -> Vec<HathiTrustItem> {
    // When several HathiTrust holdings appear, the last one wins.
    let holding = data
        .iter()
        .filter(|h| kind_of_holding(h) == HoldingKind::HathiTrust)
        .next_back();

    holding.map_or_else(Vec::new, |h| {
        items_of(h)
            .iter()
            .map(|item| {
                let id = str_of(item, "id").unwrap_or_default();
                HathiTrustItem {
                    url: format!("http://hdl.handle.net/2027/{id}"),
                    id,
                    description: str_of(item, "description"),
                    source: str_of(item, "source"),
                    status: str_of(item, "status"),
                }
            })
            .collect()
    })
}

fn alma_digital_items(data: &[Value]) -> Vec<AlmaDigitalItem> {
    data.iter()
        .filter(|h| kind_of_holding(h) == HoldingKind::AlmaDigital)
        .map(|h| AlmaDigitalItem {
            url: str_of(h, "link"),
            delivery_description: str_of(h, "delivery_description"),
            label: str_of(h, "label"),
            public_note: str_of(h, "public_note"),
        })
        .collect()
}

fn electronic_items(data: &[Value]) -> Vec<ElectronicItem> {
    data.iter()
        .filter(|h| kind_of_holding(h) == HoldingKind::Electronic)
        .map(|h| ElectronicItem {
            url: str_of(h, "link"),
            campuses: h
                .get("campuses")
                .and_then(Value::as_array)
                .map_or_else(Vec::new, |items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                }),
            interface_name: str_of(h, "interface_name"),
            collection_name: str_of(h, "collection_name"),
            description: str_of(h, "description"),
            public_note: str_of(h, "public_note"),
            note: str_of(h, "note"),
            is_available: str_of(h, "status").as_deref() == Some("Available")
                || str_of(h, "link_text").as_deref() == Some("Available online"),
        })
        .collect()
}

fn finding_aids(data: &[Value]) -> Option<FindingAids> {
    // The physical holding the finding aids describe is the one flagged
    // record_has_finding_aid; the last such holding wins.
    let physical_holding = data
        .iter()
        .filter(|h| bool_of(h, "record_has_finding_aid"))
        .next_back();

    let items: Vec<&Value> = data
        .iter()
        .filter(|h| kind_of_holding(h) == HoldingKind::FindingAid)
        .collect();
    if items.is_empty() {
        return None;
    }

    let holding_call_number =
        physical_holding.and_then(|h| items_of(h).first().and_then(|i| str_of(i, "callnumber")));

    Some(FindingAids {
        physical_location: physical_holding.map(|h| PhysicalLocation {
            url: str_of(h, "info_link"),
            text: str_of(h, "display_name"),
            floor: str_of(h, "floor_location"),
            code: LibLoc {
                library: str_of(h, "library"),
                location: str_of(h, "location"),
            },
            temporary: false,
        }),
        items: items
            .into_iter()
            .map(|item| FindingAidItem {
                url: str_of(item, "link"),
                call_number: holding_call_number.clone(),
                description: str_of(item, "description"),
            })
            .collect(),
    })
}

fn physical_holdings(data: &[Value], bib_id: &str, record: &BibRecord) -> Vec<PhysicalHolding> {
    data.iter()
        .filter(|h| kind_of_holding(h) == HoldingKind::Physical)
        .map(|h| PhysicalHolding {
            holding_id: str_of(h, "hol_mmsid"),
            call_number: str_of(h, "callnumber"),
            summary: str_of(h, "summary_holdings"),
            public_note: str_of(h, "public_note"),
            physical_location: PhysicalLocation {
                url: str_of(h, "info_link"),
                text: str_of(h, "display_name"),
                floor: str_of(h, "floor_location"),
                code: LibLoc {
                    library: str_of(h, "library"),
                    location: str_of(h, "location"),
                },
                temporary: false,
            },
            items: items_of(h)
                .iter()
                .map(|item| physical_item(item, bib_id, record))
                .collect(),
        })
        .collect()
}

fn physical_item(item: &Value, bib_id: &str, record: &BibRecord) -> PhysicalItem {
    let reservable = bool_of(item, "can_reserve");
    let url = if reservable {
        Some(reservable_url(item, record))
    } else {
        str_of(item, "barcode").map(|barcode| {
            format!("https://search.lib.umich.edu/catalog/record/{bib_id}/get-this/{barcode}")
        })
    };

    PhysicalItem {
        item_id: str_of(item, "item_id"),
        barcode: str_of(item, "barcode"),
        fulfillment_unit: str_of(item, "fulfillment_unit"),
        call_number: str_of(item, "callnumber"),
        process_type: str_of(item, "process_type"),
        item_policy: str_of(item, "item_policy"),
        description: str_of(item, "description"),
        inventory_number: str_of(item, "inventory_number"),
        material_type: str_of(item, "material_type"),
        reservable,
        physical_location: PhysicalLocation {
            url: str_of(item, "info_link"),
            text: str_of(item, "display_name"),
            floor: None,
            code: LibLoc {
                library: str_of(item, "library"),
                location: str_of(item, "location"),
            },
            temporary: bool_of(item, "temp_location"),
        },
        url,
    }
}

// ---------------------------------------------------------------------------
// Reservable items
// ---------------------------------------------------------------------------

/// Reading-room reservation provider, keyed by owning library code.
///
/// Each variant supplies a logon base URL; Clements additionally overrides
/// the author extraction rules and maps material types through a genre
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReservationProvider {
    Standard,
    Bentley,
    Clements,
}

impl ReservationProvider {
    fn from_library(code: Option<&str>) -> Self {
        match code {
            Some("BENT") => ReservationProvider::Bentley,
            Some("CLEM") => ReservationProvider::Clements,
            _ => ReservationProvider::Standard,
        }
    }

    fn base_url(self) -> &'static str {
        match self {
            ReservationProvider::Standard => "https://aeon.lib.umich.edu/logon?",
            ReservationProvider::Bentley => "https://aeon.bentley.umich.edu/login?",
            ReservationProvider::Clements => "https://aeon.clements.umich.edu/logon?",
        }
    }

    fn author_rules(self) -> Vec<FieldRule> {
        match self {
            ReservationProvider::Clements => vec![
                FieldRule::for_tags(&["100"]).text_subfields("abcd"),
                FieldRule::for_tags(&["110"]).text_subfields("ab"),
                FieldRule::for_tags(&["111"]).text_subfields("acd"),
                FieldRule::for_tags(&["130"]).text_subfields("aplskf"),
            ],
            _ => vec![
                FieldRule::for_tags(&["100", "110"]).text_subfields("abcd"),
                FieldRule::for_tags(&["111"]).text_subfields("anbc"),
                FieldRule::for_tags(&["130"]).text_subfields("aplskf"),
            ],
        }
    }

    fn genre(self, material_type: Option<String>) -> Option<String> {
        match self {
            ReservationProvider::Clements => {
                material_type.as_deref().and_then(|mt| match mt {
                    "BOOK" | "ISSBD" | "ISSUE" => Some("Book"),
                    "SCORE" | "OTHERVM" => Some("Graphics"),
                    "MIXED" => Some("Manuscripts"),
                    "ATLAS" | "MAP" => Some("Map"),
                    _ => None,
                })
                .map(str::to_string)
            }
            _ => material_type,
        }
    }
}

fn join_paired(extractor: &Extractor<'_>, rules: &[FieldRule]) -> Option<String> {
    let pairs = extractor.paired_fields(rules);
    if pairs.is_empty() {
        return None;
    }
    let parts: Vec<String> = pairs
        .iter()
        .map(|pair| match &pair.transliterated {
            Some(translit) => format!("{}; {}", pair.original.text, translit.text),
            None => pair.original.text.clone(),
        })
        .collect();
    Some(parts.join("; "))
}

fn join_unpaired(extractor: &Extractor<'_>, rules: &[FieldRule]) -> Option<String> {
    let elements = extractor.unpaired_fields(rules);
    if elements.is_empty() {
        return None;
    }
    Some(
        elements
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
    )
}

fn first_unpaired(extractor: &Extractor<'_>, rules: &[FieldRule]) -> Option<String> {
    extractor
        .unpaired_fields(rules)
        .first()
        .map(|e| e.text.clone())
}

/// Build the provider-specific reservation URL for one reservable item.
#[must_use]
pub fn reservable_url(item: &Value, record: &BibRecord) -> String {
    let provider = ReservationProvider::from_library(str_of(item, "library").as_deref());
    let extractor = Extractor::new(record);

    let title = join_paired(&extractor, &[FieldRule::for_tags(&["245"]).text_subfields("abk")]);
    let author = join_paired(&extractor, &provider.author_rules());
    let date = join_unpaired(
        &extractor,
        &[
            FieldRule::for_tags(&["260", "264"]).text_subfields("c"),
            FieldRule::for_tags(&["245"]).text_subfields("f"),
        ],
    );
    let edition = join_paired(&extractor, &[FieldRule::for_tags(&["250"]).text_subfields("a")]);
    let publisher = join_paired(
        &extractor,
        &[FieldRule::for_tags(&["260", "264"]).text_subfields("b")],
    );
    let place = join_paired(
        &extractor,
        &[FieldRule::for_tags(&["260", "264"]).text_subfields("a")],
    );
    let extent = join_paired(&extractor, &[FieldRule::for_tags(&["300"]).text_subfields("abcf")]);
    let isbn = first_unpaired(
        &extractor,
        &[
            FieldRule::for_tags(&["020"]).text_subfields("a"),
            FieldRule::for_tags(&["020"]).text_subfields("z"),
        ],
    );
    let issn = first_unpaired(
        &extractor,
        &[
            FieldRule::for_tags(&["022"]).text_subfields("a"),
            FieldRule::for_tags(&["022"]).text_subfields("y"),
            FieldRule::for_tags(&["022"]).text_subfields("z"),
            FieldRule::for_tags(&["776"]).text_subfields("x"),
        ],
    );
    let sysnum = record.control_field("001").map(str::to_string);

    let fields: [(&str, Option<String>); 19] = [
        ("Action", Some("10".to_string())),
        ("Form", Some("30".to_string())),
        ("callnumber", str_of(item, "callnumber")),
        ("genre", provider.genre(str_of(item, "material_type"))),
        ("title", title),
        ("author", author),
        ("date", date),
        ("edition", edition),
        ("publisher", publisher),
        ("place", place),
        ("extent", extent),
        ("barcode", str_of(item, "barcode")),
        ("description", str_of(item, "description")),
        ("sysnum", sysnum),
        ("location", str_of(item, "library")),
        ("sublocation", str_of(item, "location")),
        ("fixedshelf", str_of(item, "inventory_number")),
        ("issn", issn),
        ("isbn", isbn),
    ];

    let mut query = form_urlencoded::Serializer::new(String::new());
    for (name, value) in fields {
        if let Some(value) = value {
            query.append_pair(name, &value);
        }
    }

    format!("{}{}", provider.base_url(), query.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;
    use serde_json::json;

    fn record_with_245() -> BibRecord {
        let mut record = BibRecord::new();
        record.add_control_field("001", "990099");
        record.add_field(
            Field::new("245", '1', '0')
                .with_subfield('a', "Archive of letters")
                .with_subfield('f', "1850-1899"),
        );
        record.add_field(Field::new("100", '1', ' ').with_subfield('a', "Writer, A."));
        record
    }

    #[test]
    fn classifies_by_library_code() {
        assert_eq!(
            kind_of_holding(&json!({"library": "ALMA_DIGITAL"})),
            HoldingKind::AlmaDigital
        );
        assert_eq!(
            kind_of_holding(&json!({"library": "HathiTrust Digital Library"})),
            HoldingKind::HathiTrust
        );
        assert_eq!(
            kind_of_holding(&json!({"library": "ELEC", "finding_aid": false})),
            HoldingKind::Electronic
        );
        assert_eq!(
            kind_of_holding(&json!({"library": "ELEC", "finding_aid": true})),
            HoldingKind::FindingAid
        );
        assert_eq!(
            kind_of_holding(&json!({"library": "HATCH"})),
            HoldingKind::Physical
        );
    }

    #[test]
    fn hathi_items_get_handle_urls() {
        let data = vec![json!({
            "library": "HathiTrust Digital Library",
            "items": [{"id": "mdp.39015", "status": "Full text", "source": "U-M"}],
        })];
        let items = hathi_trust_items(&data);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "http://hdl.handle.net/2027/mdp.39015");
        assert_eq!(items[0].status.as_deref(), Some("Full text"));
    }

    #[test]
    fn electronic_availability_from_status_or_link_text() {
        let available = json!({"library": "ELEC", "finding_aid": false, "status": "Available"});
        let by_link_text =
            json!({"library": "ELEC", "finding_aid": false, "link_text": "Available online"});
        let not_available = json!({"library": "ELEC", "finding_aid": false, "status": "Expected"});
        let items = electronic_items(&[available, by_link_text, not_available]);
        assert_eq!(
            items.iter().map(|i| i.is_available).collect::<Vec<_>>(),
            vec![true, true, false]
        );
    }

    #[test]
    fn finding_aids_absent_when_no_items() {
        let data = vec![json!({"library": "HATCH", "items": []})];
        assert!(finding_aids(&data).is_none());
    }

    #[test]
    fn finding_aids_attach_the_flagged_holding() {
        let data = vec![
            json!({
                "library": "BENT", "location": "ARCH",
                "display_name": "Bentley Historical Library",
                "record_has_finding_aid": true,
                "items": [{"callnumber": "851990 Aa 2"}],
            }),
            json!({
                "library": "ELEC", "finding_aid": true,
                "link": "https://findingaids.lib.umich.edu/x",
                "description": "Finding aid",
            }),
        ];
        let aids = finding_aids(&data).unwrap();
        assert_eq!(aids.items.len(), 1);
        assert_eq!(aids.items[0].call_number.as_deref(), Some("851990 Aa 2"));
        let location = aids.physical_location.unwrap();
        assert_eq!(location.code.library.as_deref(), Some("BENT"));
    }

    #[test]
    fn non_reservable_item_gets_the_get_this_url() {
        let record = record_with_245();
        let data = vec![json!({
            "library": "HATCH", "location": "GRAD",
            "items": [{"barcode": "39015012345", "can_reserve": false, "item_id": "2353"}],
        })];
        let holdings = physical_holdings(&data, "990099", &record);
        let item = &holdings[0].items[0];
        assert!(!item.reservable);
        assert_eq!(
            item.url.as_deref(),
            Some("https://search.lib.umich.edu/catalog/record/990099/get-this/39015012345")
        );
    }

    #[test]
    fn reservable_url_uses_the_provider_base() {
        let record = record_with_245();
        let bentley = json!({"library": "BENT", "can_reserve": true, "barcode": "b1"});
        let url = reservable_url(&bentley, &record);
        assert!(url.starts_with("https://aeon.bentley.umich.edu/login?"));
        assert!(url.contains("Action=10"));
        assert!(url.contains("Form=30"));
        assert!(url.contains("sysnum=990099"));
        assert!(url.contains("title=Archive+of+letters"));

        let standard = json!({"library": "HATCH", "can_reserve": true});
        assert!(reservable_url(&standard, &record)
            .starts_with("https://aeon.lib.umich.edu/logon?"));
    }

    #[test]
    fn clements_maps_material_type_to_genre() {
        let provider = ReservationProvider::Clements;
        assert_eq!(provider.genre(Some("BOOK".to_string())).as_deref(), Some("Book"));
        assert_eq!(provider.genre(Some("MIXED".to_string())).as_deref(), Some("Manuscripts"));
        assert_eq!(provider.genre(Some("UNKNOWN".to_string())), None);

        let standard = ReservationProvider::Standard;
        assert_eq!(
            standard.genre(Some("BOOK".to_string())).as_deref(),
            Some("BOOK")
        );
    }
}

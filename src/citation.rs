//! RIS and CSL citation export.
//!
//! The tagged form is an ordered list of entries, each carrying the RIS tag
//! codes and Highwire meta names the content serializes under. The CSL form
//! is a citeproc-compatible item shaped by [`Csl`].

use crate::catalog_record::CatalogRecord;
use crate::engine::Extractor;
use crate::entities::{FieldElement, PairedField};
use crate::record::Field;
use crate::rules::FieldRule;
use crate::schemas::{Citation, Csl, CslContributor, CslLiteral, TaggedCitation};
use chrono::Local;

/// Build the full citation payload for one record.
#[must_use]
pub fn build_citation(record: &CatalogRecord) -> Citation {
    Citation {
        tagged: tagged_citation(record),
        csl: csl_citation(record),
    }
}

// ---------------------------------------------------------------------------
// RIS tagged form
// ---------------------------------------------------------------------------

/// RIS reference type for one lowercased format string.
fn ris_type(format: &str) -> Option<&'static str> {
    let ty = match format {
        "archival material manuscript" => "MANSCPT",
        "article" => "JOUR",
        "atlas" => "MAP",
        "audio" => "SOUND",
        "audio (music)" => "MUSIC",
        "audio (spoken word)" => "SOUND",
        "audio cd" => "SOUND",
        "audio lp" => "SOUND",
        "audio recording" => "SOUND",
        "book" => "BOOK",
        "book / ebook" => "BOOK",
        "book chapter" => "CHAP",
        "cdrom" => "DBASE",
        "computer file" => "DBASE",
        "conference" => "CONF",
        "conference proceeding" => "CONF",
        "data file" => "DBASE",
        "data set" => "DBASE",
        "dictionaries" => "DICT",
        "dissertation" => "THES",
        "ebook" => "EBOOK",
        "electronic resource" => "WEB",
        "encyclopedias" => "ENCYC",
        "gen" => "GEN",
        "government document" => "GOVDOC",
        "image" => "ADVS",
        "internet communication" => "ICOMM",
        "journal" => "JFULL",
        "journal / ejournal" => "JFULL",
        "journal article" => "JOUR",
        "magazine" => "MGZN",
        "magazine article" => "MGZN",
        "map" => "MAP",
        "maps-atlas" => "MAP",
        "motion picture" => "VIDEO",
        "music" => "MUSIC",
        "music recording" => "MUSIC",
        "musical score" => "MUSIC",
        "music score" => "MUSIC",
        "newsletter" => "NEWS",
        "newsletter article" => "NEWS",
        "newsletter articles" => "NEWS",
        "newspaper" => "NEWS",
        "newspaper article" => "NEWS",
        "newspaper articles" => "NEWS",
        "paper" => "CPAPER",
        "patent" => "PAT",
        "publication article" => "JOUR",
        "reference entry" => "JOUR",
        "report" => "RPRT",
        "review" => "JOUR",
        "serial" => "SER",
        "sheet music" => "MUSIC",
        "software" => "DBASE",
        "spoken word recording" => "SOUND",
        "streaming audio" => "SOUND",
        "streaming video" => "VIDEO",
        "student thesis" => "THES",
        "text resource" => "JOUR",
        "thesis" => "THES",
        "trade publication article" => "JOUR",
        "video" => "VIDEO",
        "video recording" => "VIDEO",
        "video (blu-ray)" => "VIDEO",
        "video (dvd)" => "VIDEO",
        "video (vhs)" => "VIDEO",
        "video games" => "VIDEO",
        "web resource" => "WEB",
        _ => return None,
    };
    Some(ty)
}

fn entry(content: impl Into<String>, ris: &[&str], meta: &[&str]) -> TaggedCitation {
    TaggedCitation {
        content: content.into(),
        ris: ris.iter().map(ToString::to_string).collect(),
        meta: meta.iter().map(ToString::to_string).collect(),
    }
}

fn push_all(out: &mut Vec<TaggedCitation>, contents: Vec<String>, ris: &[&str], meta: &[&str]) {
    for content in contents {
        out.push(entry(content, ris, meta));
    }
}

fn paired_texts(fields: &[PairedField]) -> Vec<String> {
    fields
        .iter()
        .map(|f| f.citation_text().to_string())
        .collect()
}

fn element_texts(elements: &[FieldElement]) -> Vec<String> {
    elements.iter().map(|e| e.text.clone()).collect()
}

fn type_entry(record: &CatalogRecord) -> TaggedCitation {
    let mut formats = record.doc().get_list("format");
    if formats.is_empty() {
        formats.push("Article".to_string());
    }
    let content = formats
        .iter()
        .find_map(|f| ris_type(&f.to_lowercase()))
        .unwrap_or("GEN");
    entry(content, &["TY"], &[])
}

fn is_editor_700(field: &Field) -> bool {
    field.indicator1 == '0' && subfield_e(field).starts_with("ed")
}

/// The ordered RIS entry list.
fn tagged_citation(record: &CatalogRecord) -> Vec<TaggedCitation> {
    let extractor = Extractor::new(record.bib());
    let marc = |rules: &[FieldRule]| paired_texts(&extractor.paired_fields(rules));

    let mut out = vec![
        type_entry(record),
        entry("U-M Catalog Search", &["DB"], &[]),
        entry("University of Michigan Library", &["DP"], &[]),
        entry(
            Local::now().format("%Y-%m-%d").to_string(),
            &["Y2"],
            &["online_date"],
        ),
    ];

    push_all(&mut out, record.doc().get_list("id"), &["ID"], &["id"]);
    push_all(
        &mut out,
        paired_texts(&record.bibliography()),
        &["AB"],
        &["abstract"],
    );
    push_all(
        &mut out,
        marc(&[
            FieldRule::for_tags(&["100", "101", "110", "111", "700", "710", "711"])
                .text_subfields("abcdefgjklnpqtu4"),
        ]),
        &["AU"],
        &["author"],
    );
    push_all(&mut out, element_texts(&record.call_number()), &["CN"], &[]);
    push_all(
        &mut out,
        marc(&[FieldRule::for_tags(&["260"]).text_subfields("a")]),
        &["CP", "CY"],
        &[],
    );
    push_all(
        &mut out,
        record.doc().get_list("display_date"),
        &["DA", "PY", "Y1"],
        &["date", "publication_date", "online_date", "cover_date", "year"],
    );
    push_all(
        &mut out,
        marc(&[FieldRule::for_tags(&["700"])
            .text_subfields("ab")
            .filter(is_editor_700)]),
        &["ED", "A2"],
        &["editor"],
    );
    push_all(&mut out, paired_texts(&record.edition()), &["ET"], &[]);
    push_all(
        &mut out,
        marc(&[FieldRule::for_tags(&["245"]).text_subfields("abnp")]),
        &["JF", "T1", "TI"],
        &["title", "journal_title"],
    );
    push_all(
        &mut out,
        element_texts(&record.lc_subjects()),
        &["KW"],
        &["keywords"],
    );
    push_all(
        &mut out,
        element_texts(&record.remediated_lc_subjects()),
        &["KW"],
        &["keywords"],
    );
    push_all(
        &mut out,
        element_texts(&record.other_subjects()),
        &["KW"],
        &["keywords"],
    );
    push_all(
        &mut out,
        record.doc().get_list("hlb3Delimited"),
        &["KW"],
        &["keywords"],
    );
    push_all(
        &mut out,
        marc(&[FieldRule::for_tags(&["856"]).text_subfields("u")]),
        &["L2"],
        &["fulltext_html_url", "abstract_html_url"],
    );
    push_all(
        &mut out,
        element_texts(&record.language()),
        &["LA"],
        &["language"],
    );
    push_all(
        &mut out,
        marc(&[FieldRule::for_tags(&["300"]).text_subfields("a")]),
        &["M1", "NV"],
        &["id"],
    );
    push_all(
        &mut out,
        paired_texts(&record.summary()),
        &["N2"],
        &["abstract"],
    );
    push_all(
        &mut out,
        paired_texts(&record.content_advice()),
        &["N2"],
        &["abstract"],
    );
    push_all(
        &mut out,
        marc(&[FieldRule::for_tags(&["264", "260"]).text_subfields("b")]),
        &["PB"],
        &["publisher"],
    );
    push_all(&mut out, element_texts(&record.isbn()), &["SN"], &["isbn"]);
    push_all(&mut out, element_texts(&record.issn()), &["SN"], &["issn"]);
    push_all(
        &mut out,
        paired_texts(&record.previous_title()),
        &["T2"],
        &["journal_title", "book_title", "conference", "conference_title"],
    );
    push_all(
        &mut out,
        paired_texts(&record.series()),
        &["T3"],
        &["series_title"],
    );

    out.push(entry("", &["ER"], &[]));
    out
}

// ---------------------------------------------------------------------------
// CSL form
// ---------------------------------------------------------------------------

/// CSL item type for one display format string. Keys are case-sensitive.
fn csl_type(format: &str) -> Option<&'static str> {
    let ty = match format {
        "Article" => "article-journal",
        "Archival Material" => "article-journal",
        "Archive" => "article-journal",
        "Audio Recording" => "article",
        "Clothing" => "article",
        "Furnishing" => "article",
        "Serial" => "article-journal",
        "Government Document" => "article",
        "Journal / eJournal" => "article-journal",
        "Journal" => "article-journal",
        "Magazine" => "article-magazine",
        "Market Research" => "article-journal",
        "Model" => "article",
        "Microform" => "article",
        "Mixed Material" => "article",
        "Publication" => "article-journal",
        "Publication Article" => "article-journal",
        "Reference" => "article-journal",
        "Spoken Word Recoding" => "article",
        "Audio (spoken word)" => "article",
        "Standard" => "article",
        "Unknown" => "article",
        "Trade Publication Article" => "article-journal",
        "Transcript" => "article",
        "Artifact" => "article",
        "Reference Entry" => "article-journal",
        "Magazine Article" => "article-magazine",
        "Newspaper Article" => "article-newspaper",
        "Journal Article" => "article-journal",
        "bill" => "bill",
        "Biography" => "book",
        "Book / eBook" => "book",
        "Book" => "book",
        "Dictionaries" => "book",
        "Directories" => "book",
        "Encyclopedias" => "book",
        "broadcast" => "broadcast",
        "Book Chapter" => "chapter",
        "CDROM" => "dataset",
        "Computer File" => "dataset",
        "Data File" => "dataset",
        "Data Set" => "dataset",
        "Software" => "dataset",
        "Statistics" => "dataset",
        "Dataset" => "dataset",
        "entry" => "entry",
        "entry-dictionary" => "entry-dictionary",
        "entry-encyclopedia" => "entry-encyclopedia",
        "figure" => "figure",
        "Image" => "graphic",
        "Photographs and Pictorial Works" => "graphic",
        "Photographs & Pictorial Works" => "graphic",
        "Photograph" => "graphic",
        "Drawing" => "graphic",
        "Painting" => "graphic",
        "Graphic Arts" => "graphic",
        "Visual Material" => "graphic",
        "Board Games" => "graphic",
        "interview" => "interview",
        "legislation" => "legislation",
        "Case" => "legal_case",
        "Manuscript" => "manuscript",
        "Newsletter" => "manuscript",
        "Newspaper" => "article-newspaper",
        "Play" => "manuscript",
        "Poem" => "manuscript",
        "Postcard" => "manuscript",
        "Archival Material Manuscript" => "manuscript",
        "Atlas" => "map",
        "Map" => "map",
        "Map-Atlas" => "map",
        "Maps-Atlas" => "map",
        "Video Recording" => "motion_picture",
        "Video (Blu-ray)" => "motion_picture",
        "Video (DVD)" => "motion_picture",
        "Video (VHS)" => "motion_picture",
        "Video Games" => "motion_picture",
        "Sheet Music" => "musical_score",
        "Music Score" => "musical_score",
        "Musical Score" => "musical_score",
        "Pamphlet" => "pamphlet",
        "Conference" => "paper-conference",
        "Conference Proceeding" => "paper-conference",
        "Paper" => "paper-conference",
        "Patent" => "patent",
        "Audio CD" => "song",
        "Audio LP" => "song",
        "Streaming Audio" => "song",
        "Music Recording" => "song",
        "Audio" => "song",
        "Music" => "song",
        "Audio (music)" => "song",
        "Motion Picture" => "motion_picture",
        "Streaming Video" => "motion_picture",
        "Video Game" => "motion_picture",
        "Video" => "motion_picture",
        "post" => "post",
        "post-weblog" => "post-weblog",
        "Personal Narrative" => "personal_communication",
        "Report" => "report",
        "Technical Report" => "report",
        "review" => "review",
        "Book Review" => "review-book",
        "Review" => "review-book",
        "Presentation" => "speech",
        "Dissertation" => "thesis",
        "Student Thesis" => "thesis",
        "treaty" => "treaty",
        "Electronic Resource" => "webpage",
        "Finding Aid" => "webpage",
        "Web Resource" => "webpage",
        "Text Resource" => "article",
        "Newsletter Article" => "article",
        _ => return None,
    };
    Some(ty)
}

/// Preference order over CSL item types when a record carries several
/// formats. Earlier entries win.
const CSL_TYPE_ORDER: [&str; 35] = [
    "article-journal",
    "article-magazine",
    "article-newspaper",
    "bill",
    "broadcast",
    "chapter",
    "dataset",
    "entry-dictionary",
    "entry-encyclopedia",
    "figure",
    "interview",
    "legal_case",
    "legislation",
    "manuscript",
    "map",
    "motion_picture",
    "musical_score",
    "pamphlet",
    "paper-conference",
    "patent",
    "personal_communication",
    "post-weblog",
    "post",
    "report",
    "review-book",
    "review",
    "speech",
    "thesis",
    "treaty",
    "webpage",
    "graphic",
    "song",
    "entry",
    "article",
    "book",
];

const AUTHOR_RELATOR_TERMS: [&str; 7] = [
    "ed",
    "ed.",
    "editor",
    "editor.",
    "trans.",
    "translator",
    "translator.",
];

const EDITOR_RELATOR_TERMS: [&str; 4] = ["ed", "ed.", "editor", "editor."];

fn subfield_e(field: &Field) -> &str {
    field.first_subfield('e').unwrap_or("")
}

fn is_personal_author(field: &Field) -> bool {
    field.indicator1 == '1' && !AUTHOR_RELATOR_TERMS.contains(&subfield_e(field))
}

fn is_inverted_personal_author(field: &Field) -> bool {
    field.indicator1 == '0' && !AUTHOR_RELATOR_TERMS.contains(&subfield_e(field))
}

fn is_corporate_author(field: &Field) -> bool {
    !AUTHOR_RELATOR_TERMS.contains(&subfield_e(field))
}

fn is_personal_editor(field: &Field) -> bool {
    field.indicator1 == '1' && EDITOR_RELATOR_TERMS.contains(&subfield_e(field))
}

fn is_inverted_personal_editor(field: &Field) -> bool {
    field.indicator1 == '0' && EDITOR_RELATOR_TERMS.contains(&subfield_e(field))
}

fn is_first_statement_264(field: &Field) -> bool {
    field.indicator2 == '1'
}

/// Family/given when the name carries a `", "` separator, literal otherwise.
fn to_contributor(name: String) -> CslContributor {
    match name.split_once(", ") {
        Some((family, given)) => CslContributor::Name {
            family: family.to_string(),
            given: given.to_string(),
        },
        None => CslContributor::Literal { literal: name },
    }
}

fn resolved_csl_type(record: &CatalogRecord) -> Option<String> {
    let formats = record.doc().get_list("format");
    if formats.is_empty() {
        return None;
    }
    let types: Vec<Option<&str>> = formats.iter().map(|f| csl_type(f)).collect();
    CSL_TYPE_ORDER
        .iter()
        .find(|t| types.contains(&Some(**t)))
        .map(ToString::to_string)
}

fn first_unpaired_text(extractor: &Extractor<'_>, rules: &[FieldRule]) -> Option<String> {
    extractor
        .unpaired_fields(rules)
        .first()
        .map(|e| e.text.clone())
}

fn first_paired_text(fields: &[PairedField]) -> Option<String> {
    fields.first().map(|f| f.citation_text().to_string())
}

fn first_element_text(elements: &[FieldElement]) -> Option<String> {
    elements.first().map(|e| e.text.clone())
}

fn csl_authors(extractor: &Extractor<'_>) -> Option<Vec<CslContributor>> {
    let mut result: Vec<CslContributor> = extractor
        .unpaired_fields(&[
            FieldRule::for_tags(&["100", "700"])
                .text_subfields("a")
                .filter(is_personal_author),
            FieldRule::for_tags(&["100", "700"])
                .text_subfields("ab")
                .filter(is_inverted_personal_author),
        ])
        .into_iter()
        .map(|e| to_contributor(e.text))
        .collect();

    result.extend(
        extractor
            .unpaired_fields(&[FieldRule::for_tags(&["110", "111", "710", "711"])
                .text_subfields("ab")
                .filter(is_corporate_author)])
            .into_iter()
            .map(|e| CslContributor::Literal { literal: e.text }),
    );

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

fn csl_editors(extractor: &Extractor<'_>) -> Option<Vec<CslContributor>> {
    let result: Vec<CslContributor> = extractor
        .unpaired_fields(&[
            FieldRule::for_tags(&["700"])
                .text_subfields("a")
                .filter(is_personal_editor),
            FieldRule::for_tags(&["700"])
                .text_subfields("ab")
                .filter(is_inverted_personal_editor),
        ])
        .into_iter()
        .map(|e| to_contributor(e.text))
        .collect();

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

fn csl_citation(record: &CatalogRecord) -> Csl {
    let extractor = Extractor::new(record.bib());
    let doc = record.doc();

    let number = first_element_text(&record.report_number())
        .filter(|text| !text.is_empty())
        .or_else(|| first_paired_text(&record.numbering()));

    Csl {
        id: doc.get_str("id").map(str::to_string),
        csl_type: resolved_csl_type(record),
        title: first_unpaired_text(
            &extractor,
            &[FieldRule::for_tags(&["245"]).text_subfields("abp")],
        ),
        edition: first_paired_text(&record.edition()),
        collection_title: first_paired_text(&record.series()),
        isbn: doc.opt_list("isbn"),
        issn: doc.opt_list("issn"),
        call_number: doc.get_list("callnumber").into_iter().next(),
        publisher_place: first_unpaired_text(
            &extractor,
            &[
                FieldRule::for_tags(&["260"]).text_subfields("a"),
                FieldRule::for_tags(&["264"])
                    .text_subfields("a")
                    .filter(is_first_statement_264),
            ],
        ),
        publisher: first_unpaired_text(
            &extractor,
            &[
                FieldRule::for_tags(&["260"]).text_subfields("b"),
                FieldRule::for_tags(&["264"])
                    .text_subfields("b")
                    .filter(is_first_statement_264),
            ],
        ),
        issued: doc
            .get_str("display_date")
            .map(|literal| CslLiteral {
                literal: literal.to_string(),
            }),
        author: csl_authors(&extractor),
        editor: csl_editors(&extractor),
        number,
    }
}

use crate::amino_acids::{AminoAcid, PatternLibrary, library};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Structured reading of a site mention such as "Ser123".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub site_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amino_acid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSite {
    pub amino_acid: Option<&'static str>,
    pub position: Option<String>,
}

impl ParsedSite {
    fn residue(aa: &'static AminoAcid, position: Option<&str>) -> Self {
        Self {
            amino_acid: Some(aa.name),
            position: position.map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amino_acid.is_none() && self.position.is_none()
    }
}

pub struct SiteAnnotator {
    library: &'static PatternLibrary,
}

impl Default for SiteAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteAnnotator {
    pub fn new() -> Self {
        Self { library: library() }
    }

    /// Parse site text into amino acid and position.
    ///
    /// Patterns are tried in priority order; the first one that matches decides
    /// the result, and a match on an unknown abbreviation or code yields an
    /// empty reading instead of falling through.
    pub fn parse(&self, text: &str) -> ParsedSite {
        let text = text
            .trim()
            .trim_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '(' | ')'))
            .trim();
        let lib = self.library;

        if let Some(caps) = lib.name_only.captures(text) {
            return lib
                .by_name(&caps[1])
                .map(|aa| ParsedSite::residue(aa, None))
                .unwrap_or_default();
        }

        if let Some(caps) = lib.abbreviation_only.captures(text) {
            return lib
                .by_abbreviation(&caps[1])
                .map(|aa| ParsedSite::residue(aa, None))
                .unwrap_or_default();
        }

        if let Some(caps) = lib.name_position.captures(text) {
            return lib
                .by_name(&caps[1])
                .map(|aa| ParsedSite::residue(aa, Some(&caps[2])))
                .unwrap_or_default();
        }

        if let Some(caps) = lib.abbreviation_position.captures(text) {
            return lib
                .by_abbreviation(&caps[1])
                .map(|aa| ParsedSite::residue(aa, Some(&caps[2])))
                .unwrap_or_default();
        }

        if let Some(caps) = lib.code_position.captures(text) {
            return caps[1]
                .chars()
                .next()
                .and_then(|code| lib.by_code(code))
                .map(|aa| ParsedSite::residue(aa, Some(&caps[2])))
                .unwrap_or_default();
        }

        ParsedSite::default()
    }

    /// Parse `site_text` and apply grounding correction.
    pub fn annotate(&self, site_text: &str, identifier: Option<String>) -> SiteInfo {
        let parsed = self.parse(site_text);
        if parsed.is_empty() {
            debug!(site_text, "Unparseable site text");
        }

        let mut site = SiteInfo {
            site_text: site_text.to_string(),
            identifier,
            amino_acid: parsed.amino_acid.map(str::to_string),
            position: parsed.position,
        };
        self.correct_grounding(&mut site);
        site
    }

    /// Replace the identifier with the canonical one whenever the amino acid is
    /// known. Upstream grounding tends to pick unrelated chemicals for residues.
    pub fn correct_grounding(&self, site: &mut SiteInfo) {
        let Some(canonical) = site
            .amino_acid
            .as_deref()
            .and_then(|name| self.library.identifier_for(name))
        else {
            return;
        };
        if site.identifier.as_deref() != Some(canonical) {
            debug!(
                site_text = %site.site_text,
                from = ?site.identifier,
                to = canonical,
                "Correcting site grounding"
            );
            site.identifier = Some(canonical.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amino_acids::AMINO_ACIDS;

    fn parse(text: &str) -> (Option<&'static str>, Option<String>) {
        let parsed = SiteAnnotator::new().parse(text);
        (parsed.amino_acid, parsed.position)
    }

    #[test]
    fn test_cascade_forms() {
        assert_eq!(parse("lysine residues"), (Some("lysine"), None));
        assert_eq!(parse("Serine"), (Some("serine"), None));
        assert_eq!(parse("Tyr"), (Some("tyrosine"), None));
        assert_eq!(parse("serine 45"), (Some("serine"), Some("45".into())));
        assert_eq!(parse("threonine residue 308"), (Some("threonine"), Some("308".into())));
        assert_eq!(parse("Ser123"), (Some("serine"), Some("123".into())));
        assert_eq!(parse("Thr-202"), (Some("threonine"), Some("202".into())));
        assert_eq!(parse("S473"), (Some("serine"), Some("473".into())));
        assert_eq!(parse(" aspartic acid 12 "), (Some("aspartic acid"), Some("12".into())));
    }

    #[test]
    fn test_unknown_forms_are_empty() {
        assert!(SiteAnnotator::new().parse("Xyz12").is_empty());
        assert!(SiteAnnotator::new().parse("foo").is_empty());
        assert!(SiteAnnotator::new().parse("X12").is_empty());
        // lower-case one-letter codes are ambiguous
        assert!(SiteAnnotator::new().parse("s473").is_empty());
        assert!(SiteAnnotator::new().parse("the kinase domain").is_empty());
        assert!(SiteAnnotator::new().parse("").is_empty());
    }

    #[test]
    fn test_every_form_maps_to_canonical_name() {
        let annotator = SiteAnnotator::new();
        for aa in AMINO_ACIDS {
            let forms = [
                aa.name.to_string(),
                format!("{} 17", aa.name),
                aa.abbreviation.to_string(),
                format!("{}17", aa.abbreviation),
                format!("{}17", aa.code),
            ];
            for form in forms {
                assert_eq!(annotator.parse(&form).amino_acid, Some(aa.name), "form {form:?}");
            }
        }
    }

    #[test]
    fn test_annotate_corrects_grounding() {
        let annotator = SiteAnnotator::new();

        let site = annotator.annotate("Ser123", None);
        assert_eq!(site.amino_acid.as_deref(), Some("serine"));
        assert_eq!(site.position.as_deref(), Some("123"));
        assert_eq!(site.identifier.as_deref(), Some("CHEBI:17115"));

        let site = annotator.annotate("Tyr", Some("pubchem:6057".into()));
        assert_eq!(site.identifier.as_deref(), Some("CHEBI:17895"));
    }

    #[test]
    fn test_annotate_keeps_identifier_when_unparsed() {
        let site = SiteAnnotator::new().annotate("kinase domain", Some("interpro:IPR000719".into()));
        assert_eq!(site.identifier.as_deref(), Some("interpro:IPR000719"));
        assert!(site.amino_acid.is_none());
    }
}

//! Specimen name normalization.

use mdro_model::PipelineOptions;

/// Trim a specimen name and collapse configured aliases to their canonical name.
pub fn normalize_specimen(raw: &str, options: &PipelineOptions) -> String {
    let trimmed = raw.trim();
    options
        .specimen_aliases
        .get(trimmed)
        .cloned()
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdro_model::WHOLE_BLOOD;

    #[test]
    fn collapses_blood_variants() {
        let options = PipelineOptions::default();
        assert_eq!(normalize_specimen(" Whole Blood(PICC1) ", &options), WHOLE_BLOOD);
        assert_eq!(normalize_specimen("Serum(Blood)", &options), WHOLE_BLOOD);
        assert_eq!(normalize_specimen("Sputum", &options), "Sputum");
    }

    #[test]
    fn honors_custom_aliases() {
        let options = PipelineOptions::default().with_specimen_alias("Urine(Cath)", "Urine");
        assert_eq!(normalize_specimen("Urine(Cath)", &options), "Urine");
    }
}

//! Declaration group/code classification.

/// Group and code cells of a statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub group: &'static str,
    pub code: &'static str,
}

pub const LISTED_SHARES: Classification = Classification {
    group: "03 - Participações Societárias",
    code: "01 - Ações",
};

/// Classification rule, keyed by the registry "Tipo" field when known.
pub type Classifier = fn(Option<&str>) -> Classification;

/// Default rule: every product declares as listed shares. Per-kind
/// rules (FIIs, fixed income) slot in here once their group/code
/// mapping is settled.
pub fn classify(_kind: Option<&str>) -> Classification {
    LISTED_SHARES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_classifies_as_listed_shares() {
        assert_eq!(classify(None), LISTED_SHARES);
        assert_eq!(classify(Some("Ações")), LISTED_SHARES);
        assert_eq!(classify(Some("FII")), LISTED_SHARES);
        assert_eq!(classify(None).group, "03 - Participações Societárias");
        assert_eq!(classify(None).code, "01 - Ações");
    }
}

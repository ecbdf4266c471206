use super::*;

#[test]
fn every_code_is_documented() {
    for code in ErrorCode::ALL {
        let doc = ErrorDocs::get(*code);
        assert!(doc.is_some(), "{code} has no documentation");
    }
}

#[test]
fn docs_start_with_their_code() {
    for code in ErrorDocs::all_codes() {
        let doc = ErrorDocs::get(code).unwrap_or_default();
        assert!(
            doc.starts_with(&format!("# {code}")),
            "{code} doc has wrong heading"
        );
    }
}

use taxpayer_core::{TaxPayer, TaxPayerField, TaxPayerValidationError};

#[test]
fn serialization_uses_camel_case_wire_fields() {
    let taxpayer = TaxPayer::new("TID-001", "Ada", "Lovelace", "12 St James's Square");

    let json = serde_json::to_value(&taxpayer).unwrap();
    assert_eq!(json["tid"], "TID-001");
    assert_eq!(json["firstName"], "Ada");
    assert_eq!(json["lastName"], "Lovelace");
    assert_eq!(json["address"], "12 St James's Square");
    assert!(json.get("first_name").is_none());

    let decoded: TaxPayer = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, taxpayer);
}

#[test]
fn deserialize_rejects_blank_required_field() {
    let value = serde_json::json!({
        "tid": "TID-002",
        "firstName": "Ada",
        "lastName": " ",
        "address": "London"
    });

    let err = serde_json::from_value::<TaxPayer>(value).unwrap_err();
    assert!(
        err.to_string().contains("Last Name is required"),
        "unexpected error: {err}"
    );
}

#[test]
fn field_accessor_matches_struct_fields() {
    let taxpayer = TaxPayer::new("TID-003", "Alan", "Turing", "Wilmslow");

    assert_eq!(taxpayer.field(TaxPayerField::Tid), "TID-003");
    assert_eq!(taxpayer.field(TaxPayerField::FirstName), "Alan");
    assert_eq!(taxpayer.field(TaxPayerField::LastName), "Turing");
    assert_eq!(taxpayer.field(TaxPayerField::Address), "Wilmslow");
}

#[test]
fn validate_rejects_empty_tid() {
    let taxpayer = TaxPayer::new("", "Alan", "Turing", "Wilmslow");
    assert_eq!(
        taxpayer.validate().unwrap_err(),
        TaxPayerValidationError::EmptyField(TaxPayerField::Tid)
    );
}

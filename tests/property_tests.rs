/// Property-based tests using proptest
/// Round-trip laws for the parameter codec and invariants of the signer.
use buckaroo_gateway::codec::ParameterSet;
use buckaroo_gateway::models::Gender;
use buckaroo_gateway::signature::HmacSigner;
use buckaroo_gateway::wire::Parameter;
use proptest::prelude::*;
use reqwest::Method;
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;

fn single(name: &str, value: String) -> Vec<Parameter> {
    vec![Parameter {
        name: name.to_string(),
        group_type: String::new(),
        group_id: String::new(),
        value: Some(value),
    }]
}

// Round-trip law: a value encoded into a wire parameter decodes back exactly
// through the matching typed accessor.
proptest! {
    #[test]
    fn string_round_trips(value in "\\PC*") {
        let list = single("Field", value.clone());
        let set = ParameterSet::new(&list);
        prop_assert_eq!(set.get_string("Field").unwrap(), value);
    }

    #[test]
    fn bool_round_trips(value in proptest::bool::ANY) {
        let list = single("Field", value.to_string());
        let set = ParameterSet::new(&list);
        prop_assert_eq!(set.get_bool("Field").unwrap(), value);
    }

    #[test]
    fn guid_round_trips(bytes in proptest::array::uniform16(0u8..)) {
        let id = Uuid::from_bytes(bytes);
        let list = single("Field", id.to_string());
        let set = ParameterSet::new(&list);
        prop_assert_eq!(set.get_guid("Field").unwrap(), id);
    }

    #[test]
    fn int_round_trips(value in proptest::num::i32::ANY) {
        let list = single("Field", value.to_string());
        let set = ParameterSet::new(&list);
        prop_assert_eq!(set.get_int("Field").unwrap(), value);
    }

    #[test]
    fn decimal_round_trips(mantissa in proptest::num::i64::ANY, scale in 0u32..10) {
        let value = Decimal::new(mantissa, scale);
        let list = single("Field", value.to_string());
        let set = ParameterSet::new(&list);
        prop_assert_eq!(set.get_decimal("Field").unwrap(), value);
    }

    #[test]
    fn enum_round_trips(gender in prop_oneof![
        Just(Gender::Male),
        Just(Gender::Female),
        Just(Gender::Other)
    ]) {
        let list = single("Field", gender.as_str().to_string());
        let set = ParameterSet::new(&list);
        prop_assert_eq!(set.get_enum::<Gender>("Field").unwrap(), gender);
    }

    #[test]
    fn string_collection_round_trips(items in proptest::collection::vec("[a-zA-Z0-9-]{1,12}", 1..8)) {
        let encoded = items
            .iter()
            .map(|item| format!("\"{}\"", item))
            .collect::<Vec<_>>()
            .join(",");
        let list = single("Field", encoded);
        let set = ParameterSet::new(&list);
        prop_assert_eq!(set.get_string_collection("Field").unwrap(), items);
    }
}

// Accessors classify arbitrary garbage instead of panicking or defaulting.
proptest! {
    #[test]
    fn typed_accessors_never_panic_on_arbitrary_values(value in "\\PC*") {
        let list = single("Field", value);
        let set = ParameterSet::new(&list);
        let _ = set.get_bool("Field");
        let _ = set.get_guid("Field");
        let _ = set.get_int("Field");
        let _ = set.get_decimal("Field");
        let _ = set.get_string_collection("Field");
        let _ = set.get_enum::<Gender>("Field");
        let _ = set.get_object::<serde_json::Value>("Field");
    }
}

// Signing is a pure function of its inputs, and sensitive to each of them.
proptest! {
    #[test]
    fn signature_is_deterministic(
        body in proptest::collection::vec(0u8.., 0..256),
        timestamp in 0i64..4_000_000_000,
        nonce in "[0-9a-f]{32}"
    ) {
        let signer = HmacSigner::new("wk", "sk");
        let url = Url::parse("https://example.test/json/transaction").unwrap();
        let a = signer.authorization_header_at(&Method::POST, &url, Some(&body), timestamp, &nonce);
        let b = signer.authorization_header_at(&Method::POST, &url, Some(&body), timestamp, &nonce);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn signature_changes_when_one_body_byte_changes(
        mut body in proptest::collection::vec(0u8.., 1..256),
        index in proptest::num::usize::ANY,
        timestamp in 0i64..4_000_000_000,
        nonce in "[0-9a-f]{32}"
    ) {
        let signer = HmacSigner::new("wk", "sk");
        let url = Url::parse("https://example.test/json/transaction").unwrap();
        let original = signer.authorization_header_at(&Method::POST, &url, Some(&body), timestamp, &nonce);

        let index = index % body.len();
        body[index] = body[index].wrapping_add(1);
        let mutated = signer.authorization_header_at(&Method::POST, &url, Some(&body), timestamp, &nonce);

        prop_assert_ne!(original, mutated);
    }
}

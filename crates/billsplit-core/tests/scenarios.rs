use billsplit_core::{calculate, ApiError, Bill, CalculateRequest, DiscountBasis};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

fn restaurant_request() -> CalculateRequest {
    serde_json::from_str(
        r#"{
            "items": [
                { "name": "Pizza", "rate": 20, "quantity": 1, "shared_by": ["Alice", "Bob", "Charlie"] },
                { "name": "Salad", "rate": 12, "quantity": 1, "shared_by": ["Alice", "Bob"] },
                { "name": "Soda",  "rate": 3,  "quantity": 2, "shared_by": ["Charlie"] }
            ],
            "tax_percent": 5,
            "discount_percent": 10
        }"#,
    )
    .unwrap()
}

#[test]
fn restaurant_check_end_to_end() {
    let response = calculate(&restaurant_request()).unwrap();
    let summary = response.summary;

    assert_close(summary.subtotal, 38.0);
    assert_close(summary.tax_amount, 1.9);
    assert_close(summary.discount_amount, 3.99);
    assert_close(summary.final_total, 35.91);
    assert_eq!(summary.tax_percent, 5.0);
    assert_eq!(summary.discount_percent, 10.0);

    let people: Vec<&str> = response.shares.keys().map(String::as_str).collect();
    assert_eq!(people, ["Alice", "Bob", "Charlie"]);

    // Everyone consumed 38/3 before tax, so everyone owes a third.
    for share in response.shares.values() {
        assert_close(*share, 11.97);
    }

    let owed: f64 = response.shares.values().sum();
    assert_close(owed, summary.final_total);
}

#[test]
fn restaurant_check_response_uses_snake_case_fields() {
    let response = calculate(&restaurant_request()).unwrap();
    let value = serde_json::to_value(&response).unwrap();

    assert!((value["final_total"].as_f64().unwrap() - 35.91).abs() < 1e-9);
    assert!((value["shares"]["Charlie"].as_f64().unwrap() - 11.97).abs() < 1e-9);
}

#[test]
fn uneven_consumption_conserves_the_total() {
    let bills = [
        (vec![(45.5, 2, vec!["A"]), (9.99, 3, vec!["B", "C"])], 8.875, 15.0),
        (vec![(1.0, 1, vec!["A", "B", "C", "D", "E", "F", "G"])], 0.0, 33.3),
        (vec![(120.0, 1, vec!["Host"]), (0.5, 7, vec!["Host", "Guest"])], 21.0, 0.0),
        (vec![(17.25, 4, vec!["X", "Y"]), (3.3, 3, vec!["Y", "Z"])], 13.0, -5.0),
    ];

    for (items, tax, discount) in bills {
        for basis in [DiscountBasis::AfterTax, DiscountBasis::Subtotal] {
            let mut bill = Bill::with_discount_basis(basis);
            for (index, (rate, quantity, shared_by)) in items.iter().enumerate() {
                bill.add_item(format!("item-{index}"), *rate, *quantity, shared_by)
                    .unwrap();
            }
            bill.set_tax(tax, true).unwrap();
            bill.set_discount(discount).unwrap();

            let owed: f64 = bill.shares().values().sum();
            assert_close(owed, bill.summary().final_total);
        }
    }
}

#[test]
fn share_keys_match_participants_with_items() {
    let mut bill = Bill::new();
    bill.add_item("Pizza", 20.0, 1, ["Alice", "Bob"]).unwrap();
    bill.add_item("Water", 0.0, 1, ["Dana"]).unwrap();

    let shares = bill.shares();
    let keys: Vec<&String> = shares.keys().collect();
    let participants: Vec<&String> = bill.participants().iter().collect();
    assert_eq!(keys, participants);
    assert_eq!(shares["Dana"], 0.0);
}

#[test]
fn empty_share_list_is_rejected_before_computation() {
    let request: CalculateRequest = serde_json::from_str(
        r#"{ "items": [ { "name": "Pizza", "rate": 20, "quantity": 1, "shared_by": [] } ] }"#,
    )
    .unwrap();

    let err = ApiError::from(calculate(&request).unwrap_err());
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value["code"], "INVALID_SHARE");
}

#[test]
fn fractional_quantity_is_rejected_by_the_decoder() {
    let result: Result<CalculateRequest, _> = serde_json::from_str(
        r#"{ "items": [ { "name": "Pizza", "rate": 20, "quantity": 1.5, "shared_by": ["A"] } ] }"#,
    );
    assert!(result.is_err());
}

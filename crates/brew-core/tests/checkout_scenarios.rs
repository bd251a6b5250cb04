//! End-to-end order scenarios: cart → checkout → finalized payment.

use brew_core::checkout::{compute_change, compute_totals};
use brew_core::rewards::reward_value;
use brew_core::{
    AddOn, AddOnCategory, Cart, CheapestLineValuation, Checkout, CheckoutStage, CoreError,
    LoyaltyMember, LoyaltySegment, MenuItem, MenuStatus, MenuType, Money, OperatorRef,
    PaymentMethod, Reward, RewardKind, Size, TaxRate, ValidationError, ZeroValuation,
};
use chrono::{DateTime, Utc};

fn cappuccino() -> MenuItem {
    MenuItem {
        menu_id: "1".to_string(),
        name: "Cappuccino".to_string(),
        menu_type: MenuType::Hot,
        status: MenuStatus::Available,
        small_price: Some(Money::from_pesos(100)),
        medium_price: Some(Money::from_pesos(200)),
        large_price: None,
        description: Some("Rich espresso with steamed milk foam".to_string()),
        prep_time: 4,
    }
}

fn soda() -> MenuItem {
    MenuItem {
        menu_id: "10".to_string(),
        name: "Classic Soda".to_string(),
        menu_type: MenuType::Soda,
        status: MenuStatus::Available,
        small_price: Some(Money::from_pesos(80)),
        medium_price: Some(Money::from_pesos(160)),
        large_price: Some(Money::from_pesos(240)),
        description: None,
        prep_time: 1,
    }
}

fn add_ons() -> Vec<AddOn> {
    vec![
        AddOn {
            id: "1".to_string(),
            name: "Extra Espresso Shot".to_string(),
            price: Money::from_pesos(25),
            category: AddOnCategory::Extra,
            description: None,
            available: true,
        },
        AddOn {
            id: "12".to_string(),
            name: "Whipped Cream".to_string(),
            price: Money::from_pesos(10),
            category: AddOnCategory::Topping,
            description: None,
            available: true,
        },
    ]
}

fn flat_discount(pesos: i64) -> Reward {
    Reward {
        id: format!("FLAT{}", pesos),
        name: format!("₱{} Discount", pesos),
        description: String::new(),
        points_required: 0,
        kind: RewardKind::Discount {
            amount: Money::from_pesos(pesos),
        },
        min_purchase: None,
        is_active: true,
    }
}

fn david() -> LoyaltyMember {
    LoyaltyMember {
        id: "LM003".to_string(),
        name: "David Johnson".to_string(),
        phone: "+63 918 345 6789".to_string(),
        email: "david.johnson@email.com".to_string(),
        points: 750,
        segment: LoyaltySegment::Premium,
        total_spent: Money::from_pesos(8900),
        is_active: true,
    }
}

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_715_000_000_000).unwrap()
}

/// 2 × (Cappuccino S + shot) + Classic Soda L with cream = ₱500.
fn five_hundred_peso_cart() -> Cart {
    let mut cart = Cart::new();
    cart.add_to_order(&cappuccino(), 2, Size::Small, vec!["Extra Espresso Shot".to_string()])
        .unwrap();
    cart.add_to_order(&soda(), 1, Size::Large, vec!["Whipped Cream".to_string()])
        .unwrap();
    assert_eq!(cart.subtotal(&add_ons()).value, Money::from_pesos(500));
    cart
}

#[test]
fn small_cappuccino_with_extra_shot_prices_line() {
    let mut cart = Cart::new();
    cart.add_to_order(&cappuccino(), 2, Size::Small, vec!["Extra Espresso Shot".to_string()])
        .unwrap();

    let line = &cart.lines()[0];
    assert_eq!(line.unit_price(&add_ons()).value, Money::from_pesos(125));
    assert_eq!(line.line_total(&add_ons()).value, Money::from_pesos(250));
    assert_eq!(cart.subtotal(&add_ons()).value, Money::from_pesos(250));
}

#[test]
fn twelve_percent_tax_without_rewards() {
    let totals = compute_totals(Money::from_pesos(500), &[], TaxRate::default(), &ZeroValuation, &[]);
    assert_eq!(totals.rewards_discount, Money::zero());
    assert_eq!(totals.tax.centavos(), 6_000);
    assert_eq!(totals.total.centavos(), 56_000);
}

#[test]
fn flat_discount_applies_before_tax() {
    let totals = compute_totals(
        Money::from_pesos(500),
        &[flat_discount(100)],
        TaxRate::default(),
        &ZeroValuation,
        &[],
    );
    assert_eq!(totals.rewards_discount, Money::from_pesos(100));
    assert_eq!(totals.tax.centavos(), 4_800);
    assert_eq!(totals.total.centavos(), 44_800);
}

#[test]
fn cash_payment_with_reward_returns_change() {
    let mut cart = five_hundred_peso_cart();
    let mut checkout = Checkout::default();
    checkout.begin(&cart).unwrap();
    checkout.attach_member(david()).unwrap();

    let mut hundred_off = flat_discount(100);
    hundred_off.points_required = 200;
    hundred_off.min_purchase = Some(Money::from_pesos(500));
    checkout.select_reward(&hundred_off, Money::from_pesos(500)).unwrap();

    let totals = checkout.totals_for(&cart, &add_ons()).value;
    assert_eq!(totals.total.centavos(), 44_800);

    checkout.set_payment_method(PaymentMethod::Cash, totals.total).unwrap();
    checkout.enter_amount(Money::from_pesos(500)).unwrap();
    assert_eq!(checkout.change(totals.total).centavos(), 5_200);

    let payment = checkout
        .confirm(&mut cart, &add_ons(), OperatorRef::guest(), now())
        .unwrap();

    assert_eq!(payment.change.centavos(), 5_200);
    assert_eq!(payment.amount_paid, Money::from_pesos(500));
    assert_eq!(payment.customer_name, "David Johnson");
    assert_eq!(payment.member.as_ref().map(|m| m.id.as_str()), Some("LM003"));
    assert_eq!(payment.selected_rewards.len(), 1);
    assert_eq!(payment.lines.len(), 2);
    assert_eq!(payment.total, payment.subtotal - payment.rewards_discount + payment.tax);
    assert!(cart.is_empty());
    assert_eq!(checkout.stage(), CheckoutStage::Confirmed);
}

#[test]
fn insufficient_cash_can_be_retried() {
    let mut cart = five_hundred_peso_cart();
    let mut checkout = Checkout::default();
    checkout.begin(&cart).unwrap();
    checkout.attach_member(david()).unwrap();
    checkout.select_reward(&flat_discount(100), Money::from_pesos(500)).unwrap();
    checkout.set_payment_method(PaymentMethod::Cash, Money::zero()).unwrap();
    checkout.enter_amount(Money::from_pesos(400)).unwrap();

    let lines_before = cart.lines().to_vec();
    let err = checkout
        .confirm(&mut cart, &add_ons(), OperatorRef::guest(), now())
        .unwrap_err();

    assert!(matches!(err, CoreError::InsufficientPayment { .. }));
    assert!(err.to_string().starts_with("Insufficient payment amount"));
    assert_eq!(cart.lines(), lines_before.as_slice());
    assert_eq!(checkout.stage(), CheckoutStage::AmountEntry);
    assert_eq!(checkout.selected_rewards().len(), 1);

    checkout.enter_amount(Money::from_pesos(448)).unwrap();
    let payment = checkout
        .confirm(&mut cart, &add_ons(), OperatorRef::guest(), now())
        .unwrap();
    assert_eq!(payment.change, Money::zero());
}

#[test]
fn merge_is_idempotent_over_add_on_order() {
    let mut merged = Cart::new();
    for _ in 0..3 {
        merged
            .add_to_order(
                &cappuccino(),
                1,
                Size::Small,
                vec!["Whipped Cream".to_string(), "Extra Espresso Shot".to_string()],
            )
            .unwrap();
    }
    merged
        .add_to_order(
            &cappuccino(),
            2,
            Size::Small,
            vec!["Extra Espresso Shot".to_string(), "Whipped Cream".to_string()],
        )
        .unwrap();

    let mut single = Cart::new();
    single
        .add_to_order(
            &cappuccino(),
            5,
            Size::Small,
            vec!["Extra Espresso Shot".to_string(), "Whipped Cream".to_string()],
        )
        .unwrap();

    assert_eq!(merged.len(), 1);
    assert_eq!(merged.total_quantity(), 5);
    assert_eq!(merged.subtotal(&add_ons()).value, single.subtotal(&add_ons()).value);
}

#[test]
fn percentage_reward_is_capped() {
    let twenty = Reward {
        id: "RWD004".to_string(),
        name: "20% Discount".to_string(),
        description: "20% off your total purchase (max ₱200)".to_string(),
        points_required: 300,
        kind: RewardKind::PercentageOff {
            percentage_bps: 2000,
            max_discount: Some(Money::from_pesos(200)),
        },
        min_purchase: None,
        is_active: true,
    };

    let value = reward_value(&twenty, Money::from_pesos(2000), &ZeroValuation, &[]);
    assert_eq!(value, Money::from_pesos(200));
}

#[test]
fn stacked_rewards_never_go_negative() {
    let rewards = [flat_discount(200), flat_discount(100), flat_discount(50)];
    let totals = compute_totals(Money::from_pesos(300), &rewards, TaxRate::default(), &ZeroValuation, &[]);

    assert_eq!(totals.rewards_discount, Money::from_pesos(300));
    assert_eq!(totals.tax, Money::zero());
    assert_eq!(totals.total, Money::zero());
    assert!(!totals.total.is_negative());
}

#[test]
fn tax_identity_holds_across_subtotals() {
    for centavos in [0_i64, 1, 99, 12_345, 50_000, 99_999, 1_000_000] {
        let subtotal = Money::from_centavos(centavos);
        let rewards = [flat_discount(30)];
        let totals = compute_totals(subtotal, &rewards, TaxRate::default(), &ZeroValuation, &[]);
        let taxable = totals.subtotal - totals.rewards_discount;

        assert_eq!(totals.tax, taxable.calculate_tax(TaxRate::default()));
        assert_eq!(totals.total, taxable + totals.tax);
        assert!(totals.rewards_discount <= totals.subtotal);
    }
}

#[test]
fn change_is_never_negative() {
    let total = Money::from_centavos(44_800);
    assert_eq!(compute_change(Money::from_pesos(1000), total).centavos(), 55_200);
    assert_eq!(compute_change(total, total), Money::zero());
    assert_eq!(compute_change(Money::zero(), total), Money::zero());
}

#[test]
fn huge_order_checks_out_without_overflow() {
    let quantity = i64::MAX / 10_000;
    let mut cart = Cart::new();
    cart.add_to_order(&cappuccino(), quantity, Size::Small, vec![]).unwrap();

    let err = cart.add_to_order(&cappuccino(), 1, Size::Small, vec![]).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::OutOfRange { .. })
    ));
    assert_eq!(cart.total_quantity(), quantity);

    let mut checkout = Checkout::default();
    checkout.begin(&cart).unwrap();
    let totals = checkout.totals_for(&cart, &add_ons()).value;
    assert_eq!(totals.subtotal.centavos(), quantity * 10_000);
    assert_eq!(totals.tax, totals.subtotal.calculate_tax(TaxRate::default()));
    // subtotal + tax no longer fits, so the total pins at the ceiling
    assert_eq!(totals.total.centavos(), i64::MAX);

    checkout.set_payment_method(PaymentMethod::Cash, totals.total).unwrap();
    checkout.enter_amount(Money::from_centavos(i64::MAX)).unwrap();
    let payment = checkout
        .confirm(&mut cart, &add_ons(), OperatorRef::guest(), now())
        .unwrap();
    assert_eq!(payment.change, Money::zero());
    assert_eq!(payment.lines[0].quantity, quantity);
}

#[test]
fn gcash_is_never_confirmed() {
    let mut cart = five_hundred_peso_cart();
    let mut checkout = Checkout::default();
    checkout.begin(&cart).unwrap();

    let total = checkout.totals_for(&cart, &add_ons()).value.total;
    checkout.set_payment_method(PaymentMethod::Gcash, total).unwrap();
    assert_eq!(checkout.amount_paid(), Some(Money::from_pesos(560)));

    let err = checkout
        .confirm(&mut cart, &add_ons(), OperatorRef::guest(), now())
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::PaymentMethodDisabled {
            method: PaymentMethod::Gcash
        }
    ));
    assert_eq!(cart.len(), 2);
}

#[test]
fn free_item_valued_by_cheapest_line() {
    let cart = five_hundred_peso_cart();
    let bogo = Reward {
        id: "RWD002".to_string(),
        name: "Buy 1 Take 1".to_string(),
        description: String::new(),
        points_required: 75,
        kind: RewardKind::BuyOneGetOne,
        min_purchase: None,
        is_active: true,
    };

    let mut zero = Checkout::default();
    zero.begin(&cart).unwrap();
    zero.attach_member(david()).unwrap();
    zero.select_reward(&bogo, Money::from_pesos(500)).unwrap();
    assert_eq!(zero.totals_for(&cart, &add_ons()).value.rewards_discount, Money::zero());

    let mut cheapest = Checkout::new(TaxRate::default()).with_valuation(CheapestLineValuation);
    cheapest.begin(&cart).unwrap();
    cheapest.attach_member(david()).unwrap();
    cheapest.select_reward(&bogo, Money::from_pesos(500)).unwrap();
    // Cappuccino S + shot = 125, Classic Soda L + cream = 250
    assert_eq!(
        cheapest.totals_for(&cart, &add_ons()).value.rewards_discount,
        Money::from_pesos(125)
    );
}

#[test]
fn add_on_toggle_does_not_touch_past_payments() {
    let mut cart = Cart::new();
    cart.add_to_order(&cappuccino(), 1, Size::Small, vec!["Whipped Cream".to_string()])
        .unwrap();

    let mut list = add_ons();
    let mut checkout = Checkout::default();
    checkout.begin(&cart).unwrap();
    checkout.set_payment_method(PaymentMethod::Cash, Money::zero()).unwrap();
    checkout.enter_amount(Money::from_pesos(200)).unwrap();
    let payment = checkout
        .confirm(&mut cart, &list, OperatorRef::guest(), now())
        .unwrap();
    assert_eq!(payment.subtotal, Money::from_pesos(110));

    list[1].available = false;
    cart.add_to_order(&cappuccino(), 1, Size::Small, vec!["Whipped Cream".to_string()])
        .unwrap();
    let subtotal = cart.subtotal(&list);
    assert_eq!(subtotal.value, Money::from_pesos(100));
    assert_eq!(subtotal.warnings.len(), 1);
    assert_eq!(payment.subtotal, Money::from_pesos(110));
}

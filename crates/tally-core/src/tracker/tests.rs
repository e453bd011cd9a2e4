use chrono::NaiveDate;

use super::*;
use crate::models::*;
use crate::period::Month;

const ALICE: Option<&str> = Some("alice");
const BOB: Option<&str> = Some("bob");

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn month(s: &str) -> Month {
    s.parse().unwrap()
}

fn tracker() -> Tracker {
    Tracker::with_today(Database::in_memory().unwrap(), date("2025-06-15"))
}

fn custom_category(t: &Tracker, caller: Option<&str>, kind: CategoryType) -> i64 {
    t.create_category(
        caller,
        &NewCategory {
            name: "Custom".into(),
            category_type: kind,
            color: "#123456".into(),
            icon: "🧪".into(),
        },
    )
    .unwrap()
}

fn add(t: &Tracker, amount: f64, kind: TransactionType, category_id: i64, on: &str) -> i64 {
    t.create_transaction(
        ALICE,
        &NewTransaction {
            amount,
            transaction_type: kind,
            category_id,
            date: date(on),
            description: String::new(),
            recurrence: None,
        },
    )
    .unwrap()
}

#[test]
fn test_missing_identity_is_unauthenticated() {
    let t = tracker();

    assert!(matches!(
        t.get_user_categories(None, None),
        Err(Error::Unauthenticated)
    ));
    assert!(matches!(
        t.get_user_preferences(Some("  ")),
        Err(Error::Unauthenticated)
    ));
    assert!(matches!(
        t.get_monthly_summary(None, month("2025-01")),
        Err(Error::Unauthenticated)
    ));
}

#[test]
fn test_default_categories_protected() {
    let t = tracker();
    assert_eq!(t.initialize_default_categories(ALICE).unwrap(), 13);
    assert_eq!(t.initialize_default_categories(ALICE).unwrap(), 0);

    let salary = t.get_user_categories(ALICE, Some(CategoryType::Income)).unwrap()[0].clone();
    assert!(matches!(
        t.delete_category(ALICE, salary.id),
        Err(Error::ProtectedDefault)
    ));

    let custom = custom_category(&t, ALICE, CategoryType::Expense);
    t.delete_category(ALICE, custom).unwrap();
    let remaining = t.get_user_categories(ALICE, None).unwrap();
    assert_eq!(remaining.len(), 13);
    assert!(remaining.iter().all(|c| c.id != custom));
}

#[test]
fn test_category_ownership() {
    let t = tracker();
    let id = custom_category(&t, ALICE, CategoryType::Expense);

    assert!(matches!(
        t.get_category(BOB, id),
        Err(Error::NotFoundOrUnauthorized { .. })
    ));
    assert!(matches!(
        t.delete_category(BOB, id),
        Err(Error::NotFoundOrUnauthorized { .. })
    ));
    assert!(matches!(
        t.delete_category(ALICE, 9999),
        Err(Error::NotFoundOrUnauthorized { .. })
    ));
}

#[test]
fn test_category_name_required() {
    let t = tracker();
    let result = t.create_category(
        ALICE,
        &NewCategory {
            name: "   ".into(),
            category_type: CategoryType::Expense,
            color: "#000000".into(),
            icon: "x".into(),
        },
    );
    assert!(matches!(result, Err(Error::InvalidData(_))));
}

#[test]
fn test_transaction_requires_own_category() {
    let t = tracker();
    let bobs = custom_category(&t, BOB, CategoryType::Expense);

    let result = t.create_transaction(
        ALICE,
        &NewTransaction {
            amount: 10.0,
            transaction_type: TransactionType::Expense,
            category_id: bobs,
            date: date("2025-03-01"),
            description: "lunch".into(),
            recurrence: None,
        },
    );
    assert!(matches!(result, Err(Error::InvalidCategory)));

    let missing = t.add_transaction(
        ALICE,
        &NewTransaction {
            amount: 10.0,
            transaction_type: TransactionType::Expense,
            category_id: 424242,
            date: date("2025-03-01"),
            description: "lunch".into(),
            recurrence: None,
        },
    );
    assert!(matches!(missing, Err(Error::InvalidCategory)));
}

#[test]
fn test_transaction_amount_validated() {
    let t = tracker();
    let cat = custom_category(&t, ALICE, CategoryType::Expense);

    for amount in [-1.0, f64::NAN, f64::INFINITY] {
        let result = t.create_transaction(
            ALICE,
            &NewTransaction {
                amount,
                transaction_type: TransactionType::Expense,
                category_id: cat,
                date: date("2025-03-01"),
                description: String::new(),
                recurrence: None,
            },
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }
}

#[test]
fn test_transaction_date_outside_four_digit_years() {
    let t = tracker();
    let cat = custom_category(&t, ALICE, CategoryType::Expense);
    let far = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();

    let created = t.create_transaction(
        ALICE,
        &NewTransaction {
            amount: 5.0,
            transaction_type: TransactionType::Expense,
            category_id: cat,
            date: far,
            description: String::new(),
            recurrence: None,
        },
    );
    assert!(matches!(created, Err(Error::InvalidData(_))));

    let id = add(&t, 5.0, TransactionType::Expense, cat, "2025-03-01");
    let updated = t.update_transaction(
        ALICE,
        id,
        &TransactionUpdate {
            amount: 5.0,
            category_id: cat,
            date: NaiveDate::from_ymd_opt(-1, 12, 31).unwrap(),
            description: String::new(),
        },
    );
    assert!(matches!(updated, Err(Error::InvalidData(_))));

    // Nothing out of range leaked into an end-date filter
    let filter = TransactionFilter {
        end_date: Some(date("2025-12-31")),
        ..Default::default()
    };
    let listed = t.get_transactions(ALICE, &filter).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].transaction.date, date("2025-03-01"));

    let bad_filter = TransactionFilter {
        start_date: Some(far),
        ..Default::default()
    };
    assert!(matches!(
        t.get_transactions(ALICE, &bad_filter),
        Err(Error::InvalidData(_))
    ));
}

#[test]
fn test_transaction_update_and_delete_guards() {
    let t = tracker();
    let cat = custom_category(&t, ALICE, CategoryType::Expense);
    let id = add(&t, 20.0, TransactionType::Expense, cat, "2025-03-02");

    let update = TransactionUpdate {
        amount: 25.0,
        category_id: cat,
        date: date("2025-03-03"),
        description: "edited".into(),
    };
    assert!(matches!(
        t.update_transaction(BOB, id, &update),
        Err(Error::NotFoundOrUnauthorized { .. })
    ));
    t.update_transaction(ALICE, id, &update).unwrap();

    let fetched = t.get_transaction(ALICE, id).unwrap();
    assert_eq!(fetched.transaction.amount, 25.0);
    assert_eq!(fetched.category.unwrap().id, cat);

    assert!(matches!(
        t.delete_transaction(BOB, id),
        Err(Error::NotFoundOrUnauthorized { .. })
    ));
    t.delete_transaction(ALICE, id).unwrap();
    assert!(matches!(
        t.get_transaction(ALICE, id),
        Err(Error::NotFoundOrUnauthorized { .. })
    ));
}

#[test]
fn test_recent_transactions_default_limit() {
    let t = tracker();
    let cat = custom_category(&t, ALICE, CategoryType::Expense);
    for day in 1..=12 {
        add(&t, 1.0, TransactionType::Expense, cat, &format!("2025-03-{:02}", day));
    }

    let recent = t.get_recent_transactions(ALICE, None).unwrap();
    assert_eq!(recent.len(), DEFAULT_RECENT_LIMIT);
    assert_eq!(recent[0].transaction.date, date("2025-03-12"));

    let three = t.get_recent_transactions(ALICE, Some(3)).unwrap();
    assert_eq!(three.len(), 3);
}

#[test]
fn test_recent_transactions_zero_limit_uses_default() {
    let t = tracker();
    let cat = custom_category(&t, ALICE, CategoryType::Expense);
    for day in 1..=12 {
        add(&t, 1.0, TransactionType::Expense, cat, &format!("2025-04-{:02}", day));
    }

    let recent = t.get_recent_transactions(ALICE, Some(0)).unwrap();
    assert_eq!(recent.len(), DEFAULT_RECENT_LIMIT);
    assert_eq!(recent[0].transaction.date, date("2025-04-12"));
}

#[test]
fn test_monthly_summary() {
    let t = tracker();
    let income = custom_category(&t, ALICE, CategoryType::Income);
    let expense = custom_category(&t, ALICE, CategoryType::Expense);

    add(&t, 100.0, TransactionType::Income, income, "2025-03-01");
    add(&t, 40.0, TransactionType::Expense, expense, "2025-03-15");
    add(&t, 7.0, TransactionType::Expense, expense, "2025-04-01");

    let summary = t.get_monthly_summary(ALICE, month("2025-03")).unwrap();
    assert_eq!(summary.income, 100.0);
    assert_eq!(summary.expenses, 40.0);
    assert_eq!(summary.balance, 60.0);
    assert_eq!(summary.transaction_count, 2);

    match summary.breakdown {
        Breakdown::ByCategory(items) => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].category_id, expense);
            assert_eq!(items[0].amount, 40.0);
        }
        other => panic!("unexpected breakdown: {:?}", other),
    }
}

#[test]
fn test_short_month_boundary() {
    let t = tracker();
    let cat = custom_category(&t, ALICE, CategoryType::Expense);
    add(&t, 5.0, TransactionType::Expense, cat, "2025-02-28");
    add(&t, 9.0, TransactionType::Expense, cat, "2025-03-01");

    let feb = t.get_monthly_summary(ALICE, month("2025-02")).unwrap();
    assert_eq!(feb.expenses, 5.0);
    assert_eq!(feb.transaction_count, 1);
}

#[test]
fn test_deleted_category_kept_in_breakdown() {
    let t = tracker();
    let cat = custom_category(&t, ALICE, CategoryType::Expense);
    add(&t, 12.0, TransactionType::Expense, cat, "2025-03-05");
    t.delete_category(ALICE, cat).unwrap();

    let spending = t
        .get_spending_by_category(ALICE, None, None, None)
        .unwrap();
    assert_eq!(spending.len(), 1);
    assert_eq!(spending[0].category_id, cat);
    assert!(spending[0].category.is_none());

    // The orphaned transaction is still listed, without a category
    let listed = t
        .get_transactions(ALICE, &TransactionFilter::default())
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].category.is_none());
}

#[test]
fn test_yearly_and_all_time_summary() {
    let t = tracker();
    let cat = custom_category(&t, ALICE, CategoryType::Income);
    add(&t, 10.0, TransactionType::Income, cat, "2024-11-01");
    add(&t, 20.0, TransactionType::Income, cat, "2025-02-01");
    add(&t, 30.0, TransactionType::Income, cat, "2025-02-20");

    let year = t.get_yearly_summary(ALICE, 2025).unwrap();
    assert_eq!(year.income, 50.0);
    match year.breakdown {
        Breakdown::ByMonth(months) => {
            assert_eq!(months.len(), 12);
            assert_eq!(months[1].income, 50.0);
            assert_eq!(months[1].transaction_count, 2);
        }
        other => panic!("unexpected breakdown: {:?}", other),
    }

    let all = t.get_all_time_summary(ALICE).unwrap();
    assert_eq!(all.income, 60.0);
    assert_eq!(all.transaction_count, 3);
    match all.breakdown {
        Breakdown::ByYear(years) => {
            assert_eq!(years[0].period, "2025");
            assert_eq!(years[1].period, "2024");
        }
        other => panic!("unexpected breakdown: {:?}", other),
    }
}

#[test]
fn test_yearly_summary_rejects_unrepresentable_year() {
    let t = tracker();
    let cat = custom_category(&t, ALICE, CategoryType::Income);
    add(&t, 10.0, TransactionType::Income, cat, "2025-02-01");

    for year in [-1, 10000, 300000] {
        assert!(matches!(
            t.get_yearly_summary(ALICE, year),
            Err(Error::InvalidData(_))
        ));
    }

    let boundary = t.get_yearly_summary(ALICE, 9999).unwrap();
    assert_eq!(boundary.transaction_count, 0);
    assert_eq!(boundary.income, 0.0);
}

#[test]
fn test_whole_month_budget_without_spending() {
    let t = tracker();
    t.set_budget(
        ALICE,
        &SetBudget {
            category_id: None,
            amount: 500.0,
            month: month("2025-01"),
            apply_to_future_months: None,
        },
    )
    .unwrap();

    let budgets = t.get_budgets(ALICE, month("2025-01")).unwrap();
    assert_eq!(budgets.len(), 1);
    let b = &budgets[0];
    assert!(b.category.is_none());
    assert_eq!(b.budget.amount, 500.0);
    assert_eq!(b.spent, 0.0);
    assert_eq!(b.remaining, 500.0);
    assert_eq!(b.percentage, 0.0);
    assert!(!b.is_recurring);
}

#[test]
fn test_budget_spending_and_recurrence_flag() {
    let t = tracker();
    let food = custom_category(&t, ALICE, CategoryType::Expense);
    let other = custom_category(&t, ALICE, CategoryType::Expense);
    add(&t, 50.0, TransactionType::Expense, food, "2025-03-10");
    add(&t, 30.0, TransactionType::Expense, other, "2025-03-11");
    add(&t, 999.0, TransactionType::Income, other, "2025-03-11");

    t.set_budget(
        ALICE,
        &SetBudget {
            category_id: Some(food),
            amount: 200.0,
            month: month("2025-03"),
            apply_to_future_months: Some(true),
        },
    )
    .unwrap();
    t.set_budget(
        ALICE,
        &SetBudget {
            category_id: None,
            amount: 100.0,
            month: month("2025-03"),
            apply_to_future_months: None,
        },
    )
    .unwrap();

    let budgets = t.get_budgets(ALICE, month("2025-03")).unwrap();
    assert_eq!(budgets.len(), 2);

    let overall = budgets.iter().find(|b| b.budget.category_id.is_none()).unwrap();
    assert_eq!(overall.spent, 80.0);
    assert_eq!(overall.remaining, 20.0);
    assert_eq!(overall.percentage, 80.0);
    assert!(!overall.is_recurring);

    let food_budget = budgets
        .iter()
        .find(|b| b.budget.category_id == Some(food))
        .unwrap();
    assert_eq!(food_budget.spent, 50.0);
    assert_eq!(food_budget.percentage, 25.0);
    assert!(food_budget.is_recurring);
    assert_eq!(food_budget.remaining, food_budget.budget.amount - food_budget.spent);
}

#[test]
fn test_budget_horizon_follows_today() {
    let t = tracker();
    t.set_budget(
        ALICE,
        &SetBudget {
            category_id: None,
            amount: 300.0,
            month: month("2025-01"),
            apply_to_future_months: Some(true),
        },
    )
    .unwrap();

    // Today is 2025-06-15, so the horizon is December 2026
    assert!(t.get_budget(ALICE, None, month("2026-12")).unwrap().is_some());
    assert!(t.get_budget(ALICE, None, month("2027-01")).unwrap().is_none());
}

#[test]
fn test_budget_rejects_foreign_category_and_bad_amount() {
    let t = tracker();
    let bobs = custom_category(&t, BOB, CategoryType::Expense);

    let foreign = t.set_budget(
        ALICE,
        &SetBudget {
            category_id: Some(bobs),
            amount: 10.0,
            month: month("2025-01"),
            apply_to_future_months: None,
        },
    );
    assert!(matches!(foreign, Err(Error::InvalidCategory)));

    let negative = t.set_budget(
        ALICE,
        &SetBudget {
            category_id: None,
            amount: -10.0,
            month: month("2025-01"),
            apply_to_future_months: None,
        },
    );
    assert!(matches!(negative, Err(Error::InvalidData(_))));
}

#[test]
fn test_get_budget_rejects_non_positive_category() {
    let t = tracker();
    t.set_budget(
        ALICE,
        &SetBudget {
            category_id: None,
            amount: 500.0,
            month: month("2025-01"),
            apply_to_future_months: None,
        },
    )
    .unwrap();

    for id in [0, -3] {
        assert!(matches!(
            t.get_budget(ALICE, Some(id), month("2025-01")),
            Err(Error::InvalidCategory)
        ));
    }
    assert!(t.get_budget(ALICE, None, month("2025-01")).unwrap().is_some());
}

#[test]
fn test_delete_budget_guard() {
    let t = tracker();
    let write = t
        .set_budget(
            ALICE,
            &SetBudget {
                category_id: None,
                amount: 10.0,
                month: month("2025-01"),
                apply_to_future_months: None,
            },
        )
        .unwrap();

    assert!(matches!(
        t.delete_budget(BOB, write.id),
        Err(Error::NotFoundOrUnauthorized { .. })
    ));
    t.delete_budget(ALICE, write.id).unwrap();
    assert!(t.get_budgets(ALICE, month("2025-01")).unwrap().is_empty());
}

#[test]
fn test_savings_progress_clamps_and_completes() {
    let t = tracker();
    let id = t
        .create_savings_goal(
            ALICE,
            &NewSavingsGoal {
                name: "Emergency fund".into(),
                target_amount: 100.0,
                target_date: date("2026-01-01"),
                description: String::new(),
            },
        )
        .unwrap();

    let goal = t.update_savings_goal_progress(ALICE, id, 101.0).unwrap();
    assert!(goal.is_completed);
    assert_eq!(goal.current_amount, 101.0);

    let goal = t.update_savings_goal_progress(ALICE, id, -5.0).unwrap();
    assert_eq!(goal.current_amount, 0.0);
    assert!(!goal.is_completed);

    assert!(matches!(
        t.update_savings_goal_progress(BOB, id, 1.0),
        Err(Error::NotFoundOrUnauthorized { .. })
    ));
}

#[test]
fn test_savings_update_rechecks_completion() {
    let t = tracker();
    let id = t
        .create_savings_goal(
            ALICE,
            &NewSavingsGoal {
                name: "Bike".into(),
                target_amount: 500.0,
                target_date: date("2025-12-01"),
                description: String::new(),
            },
        )
        .unwrap();
    t.update_savings_goal_progress(ALICE, id, 300.0).unwrap();

    let goal = t
        .update_savings_goal(
            ALICE,
            id,
            &SavingsGoalUpdate {
                name: "Cheaper bike".into(),
                target_amount: 250.0,
                target_date: date("2025-12-01"),
                description: "used".into(),
            },
        )
        .unwrap();
    assert!(goal.is_completed);
    assert_eq!(goal.current_amount, 300.0);

    t.delete_savings_goal(ALICE, id).unwrap();
    assert!(t.get_savings_goals(ALICE).unwrap().is_empty());
}

#[test]
fn test_preferences_lazy_defaults() {
    let t = tracker();
    let prefs = t.get_user_preferences(ALICE).unwrap();
    assert_eq!(prefs.currency, "₹");
    assert_eq!(prefs.default_view, "dashboard");
    assert!(!prefs.dark_mode);

    let updated = t
        .update_user_preferences(
            ALICE,
            &PreferencesUpdate {
                currency: Some("$".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.currency, "$");
    assert_eq!(updated.default_view, "dashboard");

    let blank = t.update_user_preferences(
        ALICE,
        &PreferencesUpdate {
            default_view: Some("".into()),
            ..Default::default()
        },
    );
    assert!(matches!(blank, Err(Error::InvalidData(_))));

    // Separate row per user
    assert_eq!(t.get_user_preferences(BOB).unwrap().currency, "₹");
}

//! Database tests

use super::*;
use crate::models::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::Month;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn expense(amount: f64, category_id: i64, on: &str) -> NewTransaction {
        NewTransaction {
            amount,
            transaction_type: TransactionType::Expense,
            category_id,
            date: date(on),
            description: format!("expense on {}", on),
            recurrence: None,
        }
    }

    fn set(category_id: Option<i64>, amount: f64, m: &str, future: Option<bool>) -> SetBudget {
        SetBudget {
            category_id,
            amount,
            month: month(m),
            apply_to_future_months: future,
        }
    }

    #[test]
    fn test_in_memory_db() {
        let db = Database::in_memory().unwrap();
        assert!(db.list_categories("alice", None).unwrap().is_empty());
        assert!(db.list_savings_goals("alice").unwrap().is_empty());
    }

    #[test]
    fn test_schema_exists() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN \
                 ('categories', 'transactions', 'budgets', 'savings_goals', 'user_preferences', 'audit_log')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 6);
    }

    #[test]
    fn test_seed_default_categories_once() {
        let db = Database::in_memory().unwrap();

        let inserted = db.seed_default_categories("alice").unwrap();
        assert_eq!(inserted, DEFAULT_CATEGORIES.len());

        // Second call is a no-op
        assert_eq!(db.seed_default_categories("alice").unwrap(), 0);

        let categories = db.list_categories("alice", None).unwrap();
        assert_eq!(categories.len(), 13);
        assert!(categories.iter().all(|c| c.is_default));

        let income = db
            .list_categories("alice", Some(CategoryType::Income))
            .unwrap();
        assert_eq!(income.len(), 4);
        assert_eq!(income[0].name, "Salary");

        // Other users are unaffected
        assert!(db.list_categories("bob", None).unwrap().is_empty());
    }

    #[test]
    fn test_seed_skips_user_with_custom_category() {
        let db = Database::in_memory().unwrap();
        db.insert_category(
            "alice",
            &NewCategory {
                name: "Rent".into(),
                category_type: CategoryType::Expense,
                color: "#000000".into(),
                icon: "🏠".into(),
            },
            false,
        )
        .unwrap();

        assert_eq!(db.seed_default_categories("alice").unwrap(), 0);
        assert_eq!(db.list_categories("alice", None).unwrap().len(), 1);
    }

    #[test]
    fn test_category_update_and_delete() {
        let db = Database::in_memory().unwrap();
        let id = db
            .insert_category(
                "alice",
                &NewCategory {
                    name: "Coffee".into(),
                    category_type: CategoryType::Expense,
                    color: "#6F4E37".into(),
                    icon: "☕".into(),
                },
                false,
            )
            .unwrap();

        db.update_category(
            id,
            &CategoryUpdate {
                name: "Cafes".into(),
                color: "#111111".into(),
                icon: "🫖".into(),
            },
        )
        .unwrap();

        let category = db.get_category(id).unwrap().unwrap();
        assert_eq!(category.name, "Cafes");
        assert_eq!(category.category_type, CategoryType::Expense);
        assert!(!category.is_default);

        db.delete_category(id).unwrap();
        assert!(db.get_category(id).unwrap().is_none());
    }

    #[test]
    fn test_transaction_crud_and_recurrence() {
        let db = Database::in_memory().unwrap();

        let mut new_tx = expense(12.5, 7, "2025-03-10");
        new_tx.recurrence = Some(Recurrence {
            frequency: RecurringFrequency::Monthly,
            end_date: Some(date("2025-12-31")),
        });
        let id = db.insert_transaction("alice", &new_tx).unwrap();

        let tx = db.get_transaction(id).unwrap().unwrap();
        assert_eq!(tx.amount, 12.5);
        assert_eq!(tx.date, date("2025-03-10"));
        assert_eq!(
            tx.recurrence.unwrap().frequency,
            RecurringFrequency::Monthly
        );

        db.update_transaction(
            id,
            &TransactionUpdate {
                amount: 15.0,
                category_id: 8,
                date: date("2025-03-11"),
                description: "updated".into(),
            },
        )
        .unwrap();

        let tx = db.get_transaction(id).unwrap().unwrap();
        assert_eq!(tx.amount, 15.0);
        assert_eq!(tx.category_id, 8);
        assert_eq!(tx.description, "updated");
        // Recurrence is not part of the update
        assert!(tx.recurrence.is_some());

        db.delete_transaction(id).unwrap();
        assert!(db.get_transaction(id).unwrap().is_none());
    }

    #[test]
    fn test_list_transactions_filters_and_order() {
        let db = Database::in_memory().unwrap();

        let a = db.insert_transaction("alice", &expense(10.0, 1, "2025-01-05")).unwrap();
        let b = db.insert_transaction("alice", &expense(20.0, 2, "2025-02-05")).unwrap();
        let c = db.insert_transaction("alice", &expense(30.0, 1, "2025-02-05")).unwrap();
        db.insert_transaction(
            "alice",
            &NewTransaction {
                amount: 1000.0,
                transaction_type: TransactionType::Income,
                category_id: 3,
                date: date("2025-02-01"),
                description: "salary".into(),
                recurrence: None,
            },
        )
        .unwrap();
        db.insert_transaction("bob", &expense(99.0, 1, "2025-02-05")).unwrap();

        let all = db
            .list_transactions("alice", &TransactionFilter::default())
            .unwrap();
        assert_eq!(all.len(), 4);
        // Same date: higher id first
        assert_eq!(all[0].id, c);
        assert_eq!(all[1].id, b);
        assert_eq!(all[3].id, a);

        let expenses = db
            .list_transactions(
                "alice",
                &TransactionFilter {
                    transaction_type: Some(TransactionType::Expense),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(expenses.len(), 3);

        let category_one = db
            .list_transactions(
                "alice",
                &TransactionFilter {
                    category_id: Some(1),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(category_one.len(), 2);

        let february = db
            .list_transactions(
                "alice",
                &TransactionFilter {
                    start_date: Some(date("2025-02-01")),
                    end_date: Some(date("2025-02-28")),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(february.len(), 3);

        let limited = db
            .list_transactions(
                "alice",
                &TransactionFilter {
                    limit: Some(2),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_negative_amount_rejected_by_schema() {
        let db = Database::in_memory().unwrap();
        let result = db.insert_transaction("alice", &expense(-1.0, 1, "2025-01-01"));
        assert!(result.is_err());
    }

    #[test]
    fn test_budget_upsert_same_month() {
        let db = Database::in_memory().unwrap();

        let first = db
            .set_budget_series("alice", &set(Some(5), 200.0, "2025-01", None), 2026)
            .unwrap();
        assert!(first.inserted);

        let second = db
            .set_budget_series("alice", &set(Some(5), 250.0, "2025-01", None), 2026)
            .unwrap();
        assert!(!second.inserted);
        assert_eq!(first.id, second.id);

        let budgets = db.list_budgets("alice", month("2025-01")).unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].amount, 250.0);
        // No propagation without the flag
        assert!(db.list_budgets("alice", month("2025-02")).unwrap().is_empty());
    }

    #[test]
    fn test_whole_month_budget_is_separate_tuple() {
        let db = Database::in_memory().unwrap();

        db.set_budget_series("alice", &set(None, 500.0, "2025-01", None), 2026)
            .unwrap();
        db.set_budget_series("alice", &set(Some(5), 100.0, "2025-01", None), 2026)
            .unwrap();
        db.set_budget_series("alice", &set(None, 600.0, "2025-01", None), 2026)
            .unwrap();

        let budgets = db.list_budgets("alice", month("2025-01")).unwrap();
        assert_eq!(budgets.len(), 2);
        // Whole-month budget sorts first
        assert_eq!(budgets[0].category_id, None);
        assert_eq!(budgets[0].amount, 600.0);

        let found = db.find_budget("alice", None, month("2025-01")).unwrap();
        assert_eq!(found.unwrap().amount, 600.0);
    }

    #[test]
    fn test_unique_index_blocks_duplicate_tuple() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        conn.execute(
            "INSERT INTO budgets (user_id, category_id, amount, month) VALUES ('alice', NULL, 1, '2025-01')",
            [],
        )
        .unwrap();
        let dup = conn.execute(
            "INSERT INTO budgets (user_id, category_id, amount, month) VALUES ('alice', NULL, 2, '2025-01')",
            [],
        );
        assert!(dup.is_err());
    }

    #[test]
    fn test_budget_propagation_horizon() {
        let db = Database::in_memory().unwrap();

        let write = db
            .set_budget_series("alice", &set(Some(5), 300.0, "2025-01", Some(true)), 2026)
            .unwrap();
        // Feb 2025 through Dec 2026
        assert_eq!(write.propagated, 23);

        assert!(db.budget_exists("alice", Some(5), month("2026-12")).unwrap());
        assert!(!db.budget_exists("alice", Some(5), month("2027-01")).unwrap());
        assert_eq!(
            db.find_budget("alice", Some(5), month("2025-07"))
                .unwrap()
                .unwrap()
                .amount,
            300.0
        );
    }

    #[test]
    fn test_budget_propagation_updates_existing_rows() {
        let db = Database::in_memory().unwrap();

        db.set_budget_series("alice", &set(Some(5), 50.0, "2025-06", None), 2025)
            .unwrap();
        db.set_budget_series("alice", &set(Some(5), 80.0, "2025-04", Some(true)), 2025)
            .unwrap();

        let june = db.list_budgets("alice", month("2025-06")).unwrap();
        assert_eq!(june.len(), 1);
        assert_eq!(june[0].amount, 80.0);
    }

    #[test]
    fn test_budget_clear_future_months() {
        let db = Database::in_memory().unwrap();

        db.set_budget_series("alice", &set(Some(5), 300.0, "2025-01", Some(true)), 2026)
            .unwrap();
        // Another category's series is untouched
        db.set_budget_series("alice", &set(Some(6), 40.0, "2025-01", Some(true)), 2026)
            .unwrap();

        let write = db
            .set_budget_series("alice", &set(Some(5), 100.0, "2025-06", Some(false)), 2026)
            .unwrap();
        assert_eq!(write.propagated, 18);

        assert_eq!(
            db.find_budget("alice", Some(5), month("2025-06"))
                .unwrap()
                .unwrap()
                .amount,
            100.0
        );
        assert!(db.budget_exists("alice", Some(5), month("2025-05")).unwrap());
        assert!(!db.budget_exists("alice", Some(5), month("2025-07")).unwrap());
        assert!(db.budget_exists("alice", Some(6), month("2025-07")).unwrap());
    }

    #[test]
    fn test_budget_start_beyond_horizon_does_not_propagate() {
        let db = Database::in_memory().unwrap();

        let write = db
            .set_budget_series("alice", &set(None, 10.0, "2030-03", Some(true)), 2026)
            .unwrap();
        assert!(write.inserted);
        assert_eq!(write.propagated, 0);
        assert!(!db.budget_exists("alice", None, month("2030-04")).unwrap());
    }

    #[test]
    fn test_savings_goal_completion_is_derived() {
        let db = Database::in_memory().unwrap();
        let id = db
            .insert_savings_goal(
                "alice",
                &NewSavingsGoal {
                    name: "Laptop".into(),
                    target_amount: 1000.0,
                    target_date: date("2026-06-01"),
                    description: String::new(),
                },
            )
            .unwrap();

        let goal = db.get_savings_goal(id).unwrap().unwrap();
        assert_eq!(goal.current_amount, 0.0);
        assert!(!goal.is_completed);

        db.set_savings_progress(id, 1000.0).unwrap();
        assert!(db.get_savings_goal(id).unwrap().unwrap().is_completed);

        db.update_savings_goal(
            id,
            &SavingsGoalUpdate {
                name: "Better laptop".into(),
                target_amount: 1500.0,
                target_date: date("2026-09-01"),
                description: "pro model".into(),
            },
        )
        .unwrap();
        let goal = db.get_savings_goal(id).unwrap().unwrap();
        assert_eq!(goal.current_amount, 1000.0);
        assert!(!goal.is_completed);

        db.delete_savings_goal(id).unwrap();
        assert!(db.get_savings_goal(id).unwrap().is_none());
    }

    #[test]
    fn test_preferences_defaults_and_patch() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_preferences("alice").unwrap().is_none());

        let prefs = db.get_or_create_preferences("alice").unwrap();
        assert!(!prefs.dark_mode);
        assert_eq!(prefs.currency, DEFAULT_CURRENCY);
        assert_eq!(prefs.default_view, DEFAULT_VIEW);

        // Idempotent
        let again = db.get_or_create_preferences("alice").unwrap();
        assert_eq!(prefs.id, again.id);

        db.update_preferences(
            "alice",
            &PreferencesUpdate {
                dark_mode: Some(true),
                ..Default::default()
            },
        )
        .unwrap();

        let prefs = db.get_preferences("alice").unwrap().unwrap();
        assert!(prefs.dark_mode);
        assert_eq!(prefs.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn test_audit_log_is_per_user() {
        let db = Database::in_memory().unwrap();

        db.log_audit("alice", "create", Some("transaction"), Some(1), None)
            .unwrap();
        db.log_audit("alice", "delete", Some("transaction"), Some(1), Some("amount=5"))
            .unwrap();
        db.log_audit("bob", "create", Some("budget"), Some(2), None)
            .unwrap();

        let entries = db.list_audit_log("alice", 10).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "delete");
        assert_eq!(entries[0].details.as_deref(), Some("amount=5"));
        assert!(entries.iter().all(|e| e.user_id == "alice"));
    }
}

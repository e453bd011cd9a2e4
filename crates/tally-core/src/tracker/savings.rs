use super::{authenticate, validate_amount, validate_date, Tracker};
use crate::error::{Error, Result};
use crate::models::{NewSavingsGoal, SavingsGoal, SavingsGoalUpdate};

fn validate_goal(goal: &NewSavingsGoal) -> Result<()> {
    if goal.name.trim().is_empty() {
        return Err(Error::InvalidData("Goal name cannot be empty".into()));
    }
    validate_amount("target_amount", goal.target_amount)?;
    validate_date("target_date", goal.target_date)
}

impl Tracker {
    pub fn get_savings_goals(&self, caller: Option<&str>) -> Result<Vec<SavingsGoal>> {
        let user = authenticate(caller)?;
        self.db.list_savings_goals(user)
    }

    pub fn get_savings_goal(&self, caller: Option<&str>, id: i64) -> Result<SavingsGoal> {
        let user = authenticate(caller)?;
        self.owned_goal(user, id)
    }

    pub fn create_savings_goal(&self, caller: Option<&str>, goal: &NewSavingsGoal) -> Result<i64> {
        let user = authenticate(caller)?;
        validate_goal(goal)?;
        self.db.insert_savings_goal(user, goal)
    }

    /// Edit name, target and date. Completion is re-evaluated against the
    /// existing progress on the next read.
    pub fn update_savings_goal(
        &self,
        caller: Option<&str>,
        id: i64,
        update: &SavingsGoalUpdate,
    ) -> Result<SavingsGoal> {
        let user = authenticate(caller)?;
        self.owned_goal(user, id)?;
        validate_goal(update)?;
        self.db.update_savings_goal(id, update)?;
        self.owned_goal(user, id)
    }

    /// Overwrite saved progress. Negative amounts clamp to zero.
    pub fn update_savings_goal_progress(
        &self,
        caller: Option<&str>,
        id: i64,
        amount: f64,
    ) -> Result<SavingsGoal> {
        let user = authenticate(caller)?;
        self.owned_goal(user, id)?;
        if !amount.is_finite() {
            return Err(Error::InvalidData(format!("Invalid progress amount: {}", amount)));
        }
        self.db.set_savings_progress(id, amount.max(0.0))?;
        self.owned_goal(user, id)
    }

    pub fn delete_savings_goal(&self, caller: Option<&str>, id: i64) -> Result<()> {
        let user = authenticate(caller)?;
        self.owned_goal(user, id)?;
        self.db.delete_savings_goal(id)
    }

    fn owned_goal(&self, user: &str, id: i64) -> Result<SavingsGoal> {
        match self.db.get_savings_goal(id)? {
            Some(g) if g.user_id == user => Ok(g),
            _ => Err(Error::not_found("Savings goal")),
        }
    }
}

use super::RepoError;
use crate::models::{Day, MealPlan, MealSlot, PlanKey};
use crate::store::DocumentStore;

/// Collection holding meal plan documents, one per plan key.
pub const MEAL_PLANS: &str = "mealPlans";

/// Read and whole-document write of meal plans.
///
/// Every mutation loads the current plan, changes it in memory and writes
/// the entire document back. Two writers interleaving on the same plan lose
/// updates: the later write replaces the earlier one wholesale.
pub struct MealPlanRepository<S> {
    store: S,
}

impl<S: DocumentStore> MealPlanRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads a plan. A plan that was never written is empty, not an error.
    pub async fn load(&self, key: &PlanKey) -> Result<MealPlan, RepoError> {
        let plan = match self.store.get(MEAL_PLANS, &key.document_id()).await? {
            Some(doc) => MealPlan::from_fields(&doc.fields),
            None => MealPlan::new(),
        };
        Ok(plan)
    }

    /// Overwrites the stored plan with `plan`.
    pub async fn save(&self, key: &PlanKey, plan: &MealPlan) -> Result<(), RepoError> {
        self.store
            .set(MEAL_PLANS, &key.document_id(), plan.to_fields())
            .await?;
        tracing::debug!("Saved meal plan {}", key);
        Ok(())
    }

    /// Appends a recipe to a slot and returns the plan as written.
    pub async fn add_dish(
        &self,
        key: &PlanKey,
        day: Day,
        slot: MealSlot,
        recipe_id: &str,
    ) -> Result<MealPlan, RepoError> {
        let mut plan = self.load(key).await?;
        plan.add_dish(day, slot, recipe_id);
        self.save(key, &plan).await?;
        Ok(plan)
    }

    /// Removes the first matching entry from a slot and returns the plan.
    ///
    /// An emptied slot is dropped from the document. Nothing is written when
    /// the recipe was not in the slot.
    pub async fn remove_dish(
        &self,
        key: &PlanKey,
        day: Day,
        slot: MealSlot,
        recipe_id: &str,
    ) -> Result<MealPlan, RepoError> {
        let mut plan = self.load(key).await?;
        if plan.remove_dish(day, slot, recipe_id) {
            self.save(key, &plan).await?;
        } else {
            tracing::debug!("{} not planned for {} {} in {}", recipe_id, day, slot, key);
        }
        Ok(plan)
    }

    /// Sets a slot to exactly one recipe, or clears it with `None`.
    pub async fn set_dish(
        &self,
        key: &PlanKey,
        day: Day,
        slot: MealSlot,
        recipe_id: Option<&str>,
    ) -> Result<MealPlan, RepoError> {
        let mut plan = self.load(key).await?;
        plan.set_dish(day, slot, recipe_id.map(str::to_string));
        self.save(key, &plan).await?;
        Ok(plan)
    }
}

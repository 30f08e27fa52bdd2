use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::DailyIncome;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WindowQuery {
    /// Trailing window length in days.
    pub window_days: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct DailyIncomeList {
    #[schema(value_type = Vec<DailyIncome>)]
    pub items: Vec<DailyIncome>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Stored;

pub const COLLECTION: &str = "plan";

pub const DEFAULT_PER_MINUTE_LIMIT: i64 = 60;
pub const DEFAULT_MONTHLY_QUOTA: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    OneTime,
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::OneTime => "one_time",
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for BillingCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one_time" => Ok(BillingCycle::OneTime),
            "monthly" => Ok(BillingCycle::Monthly),
            "yearly" => Ok(BillingCycle::Yearly),
            other => Err(format!("unknown billing cycle '{other}', expected one of one_time, monthly, yearly")),
        }
    }
}

/// Database request for creating a new plan
#[derive(Debug, Clone)]
pub struct PlanCreateDBRequest {
    pub api_id: String,
    pub name: String,
    pub price_cents: i64,
    pub billing_cycle: BillingCycle,
    pub per_minute_limit: Option<i64>,
    pub monthly_quota: Option<i64>,
    pub features: Vec<String>,
}

/// A plan as written to the `plan` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub api_id: String,
    pub name: String,
    pub price_cents: i64,
    pub billing_cycle: BillingCycle,
    pub per_minute_limit: i64,
    pub monthly_quota: i64,
    #[serde(default)]
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub type PlanDBResponse = Stored<PlanRecord>;

impl PlanCreateDBRequest {
    pub fn into_record(self, now: DateTime<Utc>) -> PlanRecord {
        PlanRecord {
            api_id: self.api_id,
            name: self.name,
            price_cents: self.price_cents,
            billing_cycle: self.billing_cycle,
            per_minute_limit: self.per_minute_limit.unwrap_or(DEFAULT_PER_MINUTE_LIMIT),
            monthly_quota: self.monthly_quota.unwrap_or(DEFAULT_MONTHLY_QUOTA),
            features: self.features,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PlanCreateDBRequest {
        PlanCreateDBRequest {
            api_id: "api-1".into(),
            name: "Starter".into(),
            price_cents: 0,
            billing_cycle: BillingCycle::Monthly,
            per_minute_limit: None,
            monthly_quota: None,
            features: vec![],
        }
    }

    #[test]
    fn test_into_record_applies_limit_defaults() {
        let record = request().into_record(Utc::now());
        assert_eq!(record.per_minute_limit, 60);
        assert_eq!(record.monthly_quota, 10_000);
    }

    #[test]
    fn test_into_record_keeps_explicit_limits() {
        let record = PlanCreateDBRequest {
            per_minute_limit: Some(5),
            monthly_quota: Some(0),
            ..request()
        }
        .into_record(Utc::now());
        assert_eq!(record.per_minute_limit, 5);
        assert_eq!(record.monthly_quota, 0);
    }

    #[test]
    fn test_billing_cycle_wire_names() {
        assert_eq!(serde_json::to_value(BillingCycle::OneTime).unwrap(), "one_time");
        let parsed: BillingCycle = serde_json::from_value("yearly".into()).unwrap();
        assert_eq!(parsed, BillingCycle::Yearly);
        assert_eq!(parsed.as_str(), "yearly");
        assert_eq!("one_time".parse::<BillingCycle>(), Ok(BillingCycle::OneTime));
        assert!("weekly".parse::<BillingCycle>().is_err());
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use time::Date;

use crate::{Case, CasePriority, CaseStatus};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Partial edit of a case; `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CaseEditInput {
    pub status: Option<CaseStatus>,
    pub priority: Option<CasePriority>,
    pub auditor: Option<String>,
    pub amount: Option<i64>,
    pub description: Option<String>,
    pub close_date: Option<Date>,
}

impl CaseEditInput {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns the edited copy; the input case is left as is.
    pub fn apply(&self, case: &Case) -> Result<Case> {
        let mut edited = case.clone();
        if let Some(status) = self.status {
            edited.status = status;
        }
        if let Some(priority) = self.priority {
            edited.priority = priority;
        }
        if let Some(auditor) = &self.auditor {
            let auditor = auditor.trim();
            if auditor.is_empty() {
                bail!("case {} needs an auditor", case.number);
            }
            edited.auditor = auditor.to_owned();
        }
        if let Some(amount) = self.amount {
            if amount < 0 {
                bail!("case {} amount must be non-negative, got {amount}", case.number);
            }
            edited.amount = amount;
        }
        if let Some(description) = &self.description {
            edited.description = description.trim().to_owned();
        }
        if let Some(close_date) = self.close_date {
            edited.close_date = Some(close_date);
        }

        if let Some(close_date) = edited.close_date
            && close_date < edited.open_date
        {
            bail!(
                "case {} cannot close on {close_date} before it opened on {}",
                case.number,
                edited.open_date
            );
        }
        Ok(edited)
    }
}

/// Password-change buffers. Runtime only; never written to the settings blob.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasswordChangeForm {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChangeForm {
    pub fn is_blank(&self) -> bool {
        self.current.is_empty() && self.new.is_empty() && self.confirm.is_empty()
    }

    pub fn clear(&mut self) {
        self.current.clear();
        self.new.clear();
        self.confirm.clear();
    }

    pub fn validate(&self, verify_current: impl Fn(&str) -> bool) -> Result<()> {
        if self.current.is_empty() || self.new.is_empty() || self.confirm.is_empty() {
            bail!("fill in the current, new and confirmation password fields");
        }
        if !verify_current(&self.current) {
            bail!("current password is incorrect");
        }
        if self.new != self.confirm {
            bail!("new password and confirmation do not match");
        }
        if self.new.chars().count() < MIN_PASSWORD_LEN {
            bail!("new password must be at least {MIN_PASSWORD_LEN} characters");
        }
        Ok(())
    }

    /// Validates and, on success, wipes the buffers.
    pub fn submit(&mut self, verify_current: impl Fn(&str) -> bool) -> Result<()> {
        self.validate(verify_current)?;
        self.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CaseEditInput, PasswordChangeForm};
    use crate::{Case, CaseId, CasePriority, CaseStatus};
    use anyhow::Result;
    use time::{Date, Month};

    fn case() -> Case {
        Case {
            id: CaseId::new(1),
            number: "FIS-2024-001234".to_owned(),
            company: "Corporación Industrial del Norte SAC".to_owned(),
            ruc: "20458796321".to_owned(),
            case_type: "Renta".to_owned(),
            status: CaseStatus::EnProceso,
            priority: CasePriority::Alta,
            auditor: "María González".to_owned(),
            open_date: Date::from_calendar_date(2024, Month::January, 15).expect("valid date"),
            close_date: None,
            amount: 2_500_000,
            description: "Inconsistencias en gastos deducibles".to_owned(),
            findings: 8,
            activities: Vec::new(),
        }
    }

    fn form(current: &str, new: &str, confirm: &str) -> PasswordChangeForm {
        PasswordChangeForm {
            current: current.to_owned(),
            new: new.to_owned(),
            confirm: confirm.to_owned(),
        }
    }

    #[test]
    fn edit_merges_only_provided_fields() -> Result<()> {
        let original = case();
        let edit = CaseEditInput {
            status: Some(CaseStatus::Cerrado),
            auditor: Some("  Ana Torres ".to_owned()),
            ..CaseEditInput::default()
        };

        let edited = edit.apply(&original)?;
        assert_eq!(edited.status, CaseStatus::Cerrado);
        assert_eq!(edited.auditor, "Ana Torres");
        assert_eq!(edited.priority, original.priority);
        assert_eq!(edited.amount, original.amount);
        assert_eq!(original.status, CaseStatus::EnProceso);
        Ok(())
    }

    #[test]
    fn edit_rejects_close_before_open() {
        let edit = CaseEditInput {
            close_date: Some(Date::from_calendar_date(2023, Month::December, 1).expect("valid")),
            ..CaseEditInput::default()
        };
        let error = edit.apply(&case()).expect_err("close before open should fail");
        assert!(error.to_string().contains("before it opened"));
    }

    #[test]
    fn edit_rejects_blank_auditor_and_negative_amount() {
        let blank = CaseEditInput {
            auditor: Some("   ".to_owned()),
            ..CaseEditInput::default()
        };
        assert!(blank.apply(&case()).is_err());

        let negative = CaseEditInput {
            amount: Some(-1),
            ..CaseEditInput::default()
        };
        assert!(negative.apply(&case()).is_err());
        assert!(CaseEditInput::default().is_empty());
    }

    #[test]
    fn password_change_checks_each_rule_in_order() {
        let verify = |candidate: &str| candidate == "secreto1";

        let missing = form("", "abcdef", "abcdef").validate(verify);
        assert!(missing.expect_err("missing").to_string().contains("fill in"));

        let wrong = form("nope", "abcdef", "abcdef").validate(verify);
        assert!(wrong.expect_err("wrong").to_string().contains("incorrect"));

        let mismatch = form("secreto1", "abcdef", "abcdeg").validate(verify);
        assert!(mismatch.expect_err("mismatch").to_string().contains("do not match"));

        let short = form("secreto1", "abc", "abc").validate(verify);
        assert!(short.expect_err("short").to_string().contains("at least 6"));
    }

    #[test]
    fn successful_submit_clears_buffers() -> Result<()> {
        let mut draft = form("secreto1", "nueva-clave", "nueva-clave");
        draft.submit(|candidate| candidate == "secreto1")?;
        assert!(draft.is_blank());
        Ok(())
    }

    #[test]
    fn failed_submit_keeps_buffers() {
        let mut draft = form("secreto1", "abc", "abc");
        assert!(draft.submit(|_| true).is_err());
        assert_eq!(draft.new, "abc");
    }
}

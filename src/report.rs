//! Aggregated results of a suite run
use std::{fmt, io};

use eqvts_protocol::{Capability, Identity};
use serde::Serialize;
use termcolor::{Color, ColorSpec, NoColor, WriteColor};

use crate::driver::ScenarioOutcome;

#[derive(Clone, Debug, Default, Serialize)]
pub struct SuiteReport {
    pub cases: Vec<CaseReport>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CaseReport {
    pub name: String,
    pub identity: Identity,
    pub band_level: i32,
    #[serde(flatten)]
    pub result: CaseResult,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaseResult {
    /// The instance couldn't be created, opened or described, no scenario ran
    SetupFailed { error: String },

    Completed {
        capability: Capability,
        scenarios: Vec<ScenarioOutcome>,
        #[serde(skip_serializing_if = "Option::is_none")]
        teardown_error: Option<String>,
    },
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        match &self.result {
            CaseResult::SetupFailed { .. } => false,
            CaseResult::Completed {
                scenarios,
                teardown_error,
                ..
            } => teardown_error.is_none() && scenarios.iter().all(ScenarioOutcome::passed),
        }
    }

    pub fn scenarios(&self) -> &[ScenarioOutcome] {
        match &self.result {
            CaseResult::Completed { scenarios, .. } => scenarios,
            CaseResult::SetupFailed { .. } => &[],
        }
    }
}

impl SuiteReport {
    /// Whether every case passed. An empty suite passes.
    pub fn passed(&self) -> bool {
        self.cases.iter().all(CaseReport::passed)
    }

    pub fn failed_cases(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|c| !c.passed())
    }

    /// Writes a human readable summary, highlighting failures
    pub fn write_to(&self, w: &mut dyn WriteColor) -> io::Result<()> {
        let mut pass = ColorSpec::new();
        pass.set_fg(Some(Color::Green)).set_bold(true);
        let mut fail = ColorSpec::new();
        fail.set_fg(Some(Color::Red)).set_bold(true);

        for case in &self.cases {
            if case.passed() {
                w.set_color(&pass)?;
                write!(w, "[ PASS ]")?;
            } else {
                w.set_color(&fail)?;
                write!(w, "[ FAIL ]")?;
            }
            w.reset()?;
            writeln!(w, " {}", case.name)?;

            match &case.result {
                CaseResult::SetupFailed { error } => writeln!(w, "    setup: {}", error)?,
                CaseResult::Completed {
                    capability,
                    scenarios,
                    teardown_error,
                } => {
                    writeln!(w, "    {}", capability)?;
                    for scenario in scenarios.iter().filter(|s| !s.passed()) {
                        for step in scenario.steps.iter().filter(|s| !s.passed()) {
                            for failure in &step.failures {
                                let (kind, setting) = (scenario.kind, &step.setting);
                                writeln!(w, "    {} ({}): {}", kind, setting, failure)?;
                            }
                        }
                    }
                    if let Some(e) = teardown_error {
                        writeln!(w, "    teardown: {}", e)?;
                    }
                }
            }
        }

        let failed = self.failed_cases().count();
        writeln!(
            w,
            "{} cases, {} passed, {} failed",
            self.cases.len(),
            self.cases.len() - failed,
            failed
        )
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = NoColor::new(Vec::new());
        self.write_to(&mut writer).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&writer.into_inner()))
    }
}

#[cfg(test)]
mod test {
    use eqvts_protocol::{descriptor::EQUALIZER_TYPE_UUID, EqualizerSetting, Uuid};

    use super::*;
    use crate::{
        driver::{Failure, StepOutcome},
        effect::Status,
        scenario::ScenarioKind,
    };

    fn case(name: &str, result: CaseResult) -> CaseReport {
        CaseReport {
            name: name.to_string(),
            identity: Identity {
                type_uuid: EQUALIZER_TYPE_UUID,
                uuid: Uuid::nil(),
                proxy: None,
            },
            band_level: 0,
            result,
        }
    }

    fn completed(failures: Vec<Failure>) -> CaseResult {
        CaseResult::Completed {
            capability: Capability::from_indices(0..=9, 0..=4).unwrap(),
            scenarios: vec![ScenarioOutcome {
                kind: ScenarioKind::PresetAboveMax,
                steps: vec![StepOutcome {
                    setting: EqualizerSetting::Preset(10),
                    expected: Status::IllegalArgument,
                    actual: if failures.is_empty() {
                        Status::IllegalArgument
                    } else {
                        Status::Ok
                    },
                    observed: None,
                    failures,
                }],
            }],
            teardown_error: None,
        }
    }

    #[test]
    fn test_summary() {
        let report = SuiteReport {
            cases: vec![
                case("good", completed(vec![])),
                case(
                    "bad",
                    completed(vec![Failure::StatusMismatch {
                        expected: Status::IllegalArgument,
                        actual: Status::Ok,
                        message: None,
                    }]),
                ),
                case(
                    "broken",
                    CaseResult::SetupFailed {
                        error: "couldn't open effect".into(),
                    },
                ),
            ],
        };

        assert!(!report.passed());
        assert_eq!(report.failed_cases().count(), 2);

        let text = report.to_string();
        assert!(text.contains("[ PASS ] good"));
        assert!(text.contains("[ FAIL ] bad"));
        assert!(text.contains(
            "PresetAboveMax (preset: 10): set_parameter returned OK, expected ILLEGAL_ARGUMENT"
        ));
        assert!(text.contains("    setup: couldn't open effect"));
        assert!(text.ends_with("3 cases, 1 passed, 2 failed\n"));
    }

    #[test]
    fn test_json() {
        let report = SuiteReport {
            cases: vec![case("good", completed(vec![]))],
        };
        let value = serde_json::to_value(&report).unwrap();
        let case = &value["cases"][0];
        assert_eq!(case["status"], "completed");
        assert_eq!(case["capability"]["presets"]["max"], 9);
        assert_eq!(case["scenarios"][0]["kind"], "PresetAboveMax");
        assert_eq!(
            case["identity"]["type_uuid"],
            "0bed4300-ddd6-11db-8f34-0002a5d5c51b"
        );
        assert!(SuiteReport::default().passed());
    }
}

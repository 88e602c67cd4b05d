use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use heart_risk::error::AppError;
use heart_risk::prediction::report::AssessmentView;
use heart_risk::prediction::{assemble, ArtifactPipeline, PatientForm, PredictionError};
use serde::Serialize;
use std::io::{self, Write};

const CHART_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// Age in years
    #[arg(long)]
    pub(crate) age: Option<u16>,
    /// Female or Male (or 0/1)
    #[arg(long)]
    pub(crate) sex: Option<String>,
    /// Typical Angina, Atypical Angina, Non-anginal Pain or Asymptomatic
    #[arg(long)]
    pub(crate) chest_pain_type: Option<String>,
    /// Resting blood pressure (mm Hg)
    #[arg(long)]
    pub(crate) resting_bp: Option<u16>,
    /// Serum cholesterol (mg/dl)
    #[arg(long)]
    pub(crate) cholesterol: Option<u16>,
    /// Fasting blood sugar above 120 mg/dl: No or Yes
    #[arg(long)]
    pub(crate) fasting_bs: Option<String>,
    /// Normal, ST-T Abnormality or Left Ventricular Hypertrophy
    #[arg(long)]
    pub(crate) resting_ecg: Option<String>,
    /// Maximum heart rate achieved
    #[arg(long)]
    pub(crate) max_hr: Option<u16>,
    /// Exercise induced angina: No or Yes
    #[arg(long)]
    pub(crate) exercise_angina: Option<String>,
    /// ST depression induced by exercise
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) oldpeak: Option<f64>,
    /// Upsloping, Flat or Downsloping
    #[arg(long)]
    pub(crate) st_slope: Option<String>,
    /// Fill omitted fields with the form's initial values
    #[arg(long)]
    pub(crate) use_defaults: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Include the encoded model input
    #[arg(long)]
    pub(crate) show_input: bool,
}

impl AssessArgs {
    fn form(&self) -> PatientForm {
        let form = PatientForm {
            age: self.age,
            sex: self.sex.clone(),
            chest_pain_type: self.chest_pain_type.clone(),
            resting_bp: self.resting_bp,
            cholesterol: self.cholesterol,
            fasting_bs: self.fasting_bs.clone(),
            resting_ecg: self.resting_ecg.clone(),
            max_hr: self.max_hr,
            exercise_angina: self.exercise_angina.clone(),
            oldpeak: self.oldpeak,
            st_slope: self.st_slope.clone(),
        };

        if self.use_defaults {
            form.with_defaults()
        } else {
            form
        }
    }
}

#[derive(Debug, Serialize)]
struct AssessmentEnvelope {
    assessed_at: DateTime<Utc>,
    #[serde(flatten)]
    assessment: AssessmentView,
}

pub(crate) fn run_assess(args: AssessArgs, pipeline: &ArtifactPipeline) -> Result<(), AppError> {
    let input = args.form().into_input().map_err(PredictionError::from)?;
    let features = assemble(&input);
    let assessment = pipeline.assess_features(&features)?;

    let mut view = AssessmentView::new(&assessment);
    if args.show_input {
        view = view.with_features(&features);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => render_text(&view, &mut out)?,
        OutputFormat::Json => {
            let envelope = AssessmentEnvelope {
                assessed_at: Utc::now(),
                assessment: view,
            };
            serde_json::to_writer_pretty(&mut out, &envelope)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn render_text<W: Write>(view: &AssessmentView, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", view.tier_label)?;
    writeln!(
        out,
        "Probability of heart disease: {} ({})",
        view.probability_display, view.color
    )?;

    writeln!(out, "\nPrediction probabilities")?;
    for bar in view.chart_bars(CHART_WIDTH) {
        writeln!(out, "  {:<14} {:.2} {}", bar.label, bar.value, bar.bar)?;
    }

    if let Some(features) = &view.features {
        writeln!(out, "\nModel input")?;
        for row in features {
            writeln!(out, "  {:<15} {}", row.name, row.value)?;
        }
    }

    Ok(())
}

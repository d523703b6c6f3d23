use crate::config::Config;
use crate::display::{self, ImageViewer, SystemViewer};
use crate::engines;
use crate::error::{ErrorReport, OcrError};
use crate::extractor::TextExtractor;
use crate::input::InputSource;
use crate::loader;
use crate::preprocessing::{Pipeline, StepTiming};
use serde::Serialize;
use std::io::{self, BufRead, Write};

pub const BANNER_START: &str = "--- Extracted Text ---";
pub const BANNER_END: &str = "----------------------";
pub const FINISHED: &str = "Project finished.";

/// Everything one run produced, printed as JSON with --json
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub image_path: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub preprocessing: Option<PreprocessingSummary>,
    pub engine: Option<String>,
    pub text: Option<String>,
    pub confidence: Option<f32>,
    pub error: Option<ErrorReport>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PreprocessingSummary {
    pub total_time_ms: u64,
    pub steps: Vec<StepTiming>,
}

/// Human-readable output; silent in JSON mode
struct Console<'a, W: Write> {
    out: &'a mut W,
    quiet: bool,
}

impl<W: Write> Console<'_, W> {
    fn line(&mut self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(self.out, "{}", text)
    }

    /// Print a stage failure and record it as the run's error
    fn fail(&mut self, report: &mut RunReport, err: OcrError) -> io::Result<()> {
        tracing::debug!("Run stopped: {:?}", err);
        self.line(&format!("Error: {}", err))?;
        report.error = Some(err.report());
        Ok(())
    }

    /// Print a non-fatal problem and keep going
    fn warn(&mut self, report: &mut RunReport, err: OcrError) -> io::Result<()> {
        tracing::warn!("{}", err);
        self.line(&format!("Error: {}", err))?;
        report.warnings.push(err.to_string());
        Ok(())
    }
}

/// Drives one image through load → preprocess → OCR → print
pub struct App {
    config: Config,
    viewer: Box<dyn ImageViewer>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::with_viewer(config, Box::new(SystemViewer))
    }

    pub fn with_viewer(config: Config, viewer: Box<dyn ImageViewer>) -> Self {
        Self { config, viewer }
    }

    /// Run end to end. Stage failures are printed, never returned; the only
    /// error out of here is failing to write to `out`.
    pub fn run<R: BufRead, W: Write>(
        &self,
        source: InputSource,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<RunReport> {
        let mut report = RunReport::default();
        let mut console = Console {
            out,
            quiet: self.config.json,
        };

        self.process(source, input, &mut console, &mut report)?;

        if self.config.json {
            serde_json::to_writer_pretty(&mut *console.out, &report)?;
            writeln!(console.out)?;
        } else {
            console.line(FINISHED)?;
        }
        console.out.flush()?;

        Ok(report)
    }

    fn process<R: BufRead, W: Write>(
        &self,
        source: InputSource,
        input: &mut R,
        console: &mut Console<'_, W>,
        report: &mut RunReport,
    ) -> io::Result<()> {
        let path = match source.resolve(input, &mut *console.out) {
            Ok(Some(path)) => path,
            Ok(None) => return console.fail(report, OcrError::MissingPath),
            Err(e) => return console.fail(report, e),
        };
        report.image_path = Some(path.display().to_string());

        if !path.exists() {
            return console.fail(report, OcrError::NotFound(path));
        }

        let original = match loader::load_image(&path) {
            Ok(image) => image,
            Err(e) => return console.fail(report, e),
        };
        report.width = Some(original.width());
        report.height = Some(original.height());
        console.line(&format!(
            "Image loaded successfully from '{}' ({}x{}).",
            path.display(),
            original.width(),
            original.height()
        ))?;

        let for_display = self.config.show_images.then(|| original.clone());

        let mut write_error = None;
        let preprocessed = Pipeline::new().process(original, &mut |message: &str| {
            if let Err(e) = console.line(message) {
                write_error.get_or_insert(e);
            }
        });
        if let Some(e) = write_error {
            return Err(e);
        }
        let preprocessed = match preprocessed {
            Ok(result) => result,
            Err(e) => return console.fail(report, e),
        };
        report.preprocessing = Some(PreprocessingSummary {
            total_time_ms: preprocessed.total_time_ms,
            steps: preprocessed.steps.clone(),
        });

        if let Some(target) = &self.config.save_preprocessed {
            match preprocessed.image.save(target) {
                Ok(()) => console.line(&format!(
                    "Saved preprocessed image to '{}'.",
                    target.display()
                ))?,
                Err(e) => console.warn(report, OcrError::SaveError(e.to_string()))?,
            }
        }

        let extracted = engines::create(&self.config).and_then(|engine| {
            let extractor = TextExtractor::new(engine);
            report.engine = Some(extractor.engine_name().to_string());
            extractor.extract(Some(&preprocessed.image))
        });

        console.line(BANNER_START)?;
        match extracted {
            Ok(result) => {
                console.line(&result.text)?;
                report.text = Some(result.text);
                report.confidence = result.confidence;
            }
            Err(e) => console.fail(report, e)?,
        }
        console.line(BANNER_END)?;

        if let Some(original) = for_display {
            let mut sink = io::sink();
            let prompt_out: &mut dyn Write = if console.quiet {
                &mut sink
            } else {
                &mut *console.out
            };
            if let Err(e) = display::show_images(
                self.viewer.as_ref(),
                &original,
                &preprocessed.image,
                input,
                prompt_out,
            ) {
                console.warn(report, e)?;
            }
        }

        Ok(())
    }
}

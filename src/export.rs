use std::{
    path::PathBuf,
    sync::{Arc, Mutex, OnceLock, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use regex::Regex;
use thiserror::Error;
use tokio::time::sleep;

use crate::curriculum::{
    renderer::{CurriculumRenderer, ExportRequest, PrintBlock, PrintDocument},
    types::Curriculum,
};

/// Export trigger state. `Generating` rejects concurrent requests; `Done`
/// and `Error` auto-revert to `Ready` after a fixed display delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Ready,
    Generating,
    Done,
    Error,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already generating")]
    Busy,
    #[error("document renderer failed: {0}")]
    Renderer(String),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// External document renderer; a black box that turns the print document
/// tree into file contents.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    fn file_extension(&self) -> &'static str;
    async fn render(&self, document: &PrintDocument) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub file_name: String,
    pub path: PathBuf,
    pub bytes_written: usize,
}

/// Builds the print projection fresh on every invocation and hands it to
/// the external renderer. The phase machine is the only explicit mutual
/// exclusion in the system.
pub struct ExportPipeline {
    backend: Arc<dyn DocumentRenderer>,
    renderer: CurriculumRenderer,
    output_dir: PathBuf,
    revert_delay: Duration,
    phase: Arc<Mutex<ExportPhase>>,
}

impl ExportPipeline {
    pub fn new(backend: Arc<dyn DocumentRenderer>, output_dir: PathBuf) -> Self {
        Self {
            backend,
            renderer: CurriculumRenderer,
            output_dir,
            revert_delay: Duration::from_millis(2_000),
            phase: Arc::new(Mutex::new(ExportPhase::Ready)),
        }
    }

    pub fn with_revert_delay(mut self, delay: Duration) -> Self {
        self.revert_delay = delay;
        self
    }

    pub fn phase(&self) -> ExportPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn export_request(&self, request: &ExportRequest) -> Result<ExportReceipt, ExportError> {
        self.export(&request.model, &request.skill).await
    }

    pub async fn export(&self, model: &Curriculum, skill: &str) -> Result<ExportReceipt, ExportError> {
        self.begin()?;

        let result = self.run(model, skill).await;
        match &result {
            Ok(receipt) => {
                self.set_phase(ExportPhase::Done);
                tracing::info!(
                    target: "export",
                    file = %receipt.file_name,
                    bytes = receipt.bytes_written,
                    "export_completed"
                );
            }
            Err(err) => {
                self.set_phase(ExportPhase::Error);
                tracing::warn!(target: "export", error = %err, "export_failed");
            }
        }
        self.schedule_revert();

        result
    }

    fn begin(&self) -> Result<(), ExportError> {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *phase == ExportPhase::Generating {
            return Err(ExportError::Busy);
        }
        *phase = ExportPhase::Generating;
        Ok(())
    }

    async fn run(&self, model: &Curriculum, skill: &str) -> Result<ExportReceipt, ExportError> {
        // Rebuilt every time so the document always reflects the currently
        // displayed model.
        let document = self.renderer.render_print(model, skill);
        let bytes = self.backend.render(&document).await?;

        let file_name = export_file_name(skill, self.backend.file_extension());
        let path = self.output_dir.join(&file_name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ExportError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(ExportReceipt {
            file_name,
            path,
            bytes_written: bytes.len(),
        })
    }

    fn set_phase(&self, next: ExportPhase) {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    fn schedule_revert(&self) {
        let phase = Arc::clone(&self.phase);
        let delay = self.revert_delay;
        tokio::spawn(async move {
            sleep(delay).await;
            let mut phase = phase.lock().unwrap_or_else(PoisonError::into_inner);
            // A newer export may have started in the meantime.
            if *phase != ExportPhase::Generating {
                *phase = ExportPhase::Ready;
            }
        });
    }
}

/// Deterministic artifact name: whitespace runs in the skill collapse to a
/// single underscore.
pub fn export_file_name(skill: &str, extension: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace = WHITESPACE.get_or_init(|| {
        Regex::new(r"\s+").expect("whitespace pattern must compile")
    });
    let stem = whitespace.replace_all(skill.trim(), "_");
    format!("{stem}_Curriculum.{extension}")
}

/// Plain-text renderer so the export path works end to end without an
/// external document engine.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextDocumentRenderer;

#[async_trait]
impl DocumentRenderer for TextDocumentRenderer {
    fn file_extension(&self) -> &'static str {
        "txt"
    }

    async fn render(&self, document: &PrintDocument) -> Result<Vec<u8>, ExportError> {
        let mut out = String::new();
        out.push_str(&document.title);
        out.push('\n');
        out.push_str(&"=".repeat(document.title.chars().count()));
        out.push_str("\n\n");
        write_blocks(&mut out, &document.blocks);
        Ok(out.into_bytes())
    }
}

fn write_blocks(out: &mut String, blocks: &[PrintBlock]) {
    for block in blocks {
        match block {
            PrintBlock::Heading { level, text } => {
                out.push_str(text);
                out.push('\n');
                let underline = if *level <= 1 { '-' } else { '.' };
                out.push_str(&underline.to_string().repeat(text.chars().count()));
                out.push('\n');
            }
            PrintBlock::Paragraph { text } => {
                out.push_str(text);
                out.push('\n');
            }
            PrintBlock::Spacer => out.push('\n'),
            PrintBlock::KeepTogether(group) => write_blocks(out, group),
        }
    }
}

//! PDF export. Layout (line placement and page breaks) is computed first as
//! plain data, then drawn with printpdf's builtin Helvetica fonts.

use crate::domain::model::Plan;
use crate::utils::error::{PlannerError, Result};
use chrono::{DateTime, Utc};
use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};

// US Letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 40.0;

const BODY_SIZE: f32 = 11.0;
const HEADING_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 16.0;

const LINE_BREAK_FLOOR: f32 = 60.0;
const WEEK_BREAK_FLOOR: f32 = 80.0;

// Helvetica at 11pt averages a bit over 5pt per glyph.
const WRAP_CHARS: usize = 95;
const TITLE_GOAL_CHARS: usize = 60;
const MAX_PDF_RESOURCES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub bold: bool,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct PdfLayout {
    pub page_count: usize,
    pub lines: Vec<TextLine>,
}

struct Cursor {
    page: usize,
    y: f32,
    lines: Vec<TextLine>,
}

impl Cursor {
    fn new() -> Self {
        Self {
            page: 0,
            y: PAGE_HEIGHT - MARGIN,
            lines: Vec::new(),
        }
    }

    fn draw(&mut self, x: f32, size: f32, bold: bool, text: &str) {
        self.lines.push(TextLine {
            page: self.page,
            x,
            y: self.y,
            size,
            bold,
            text: sanitize(text),
        });
    }

    fn advance(&mut self, step: f32) {
        self.y -= step;
    }

    fn break_below(&mut self, floor: f32) {
        if self.y < floor {
            self.page += 1;
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    /// Draws `text` wrapped, advancing `step` per physical line and breaking
    /// the page after each one if the cursor drops below `floor`.
    fn paragraph(&mut self, x: f32, step: f32, floor: Option<f32>, text: &str) {
        for line in wrap(text, WRAP_CHARS) {
            self.draw(x, BODY_SIZE, false, &line);
            self.advance(step);
            if let Some(floor) = floor {
                self.break_below(floor);
            }
        }
    }
}

/// `"Plan: {goal}"` with the goal cut to 60 characters.
pub fn plan_title(goal: &str) -> String {
    format!("Plan: {}", goal.trim().chars().take(TITLE_GOAL_CHARS).collect::<String>())
}

pub fn layout_plan(plan: &Plan, title: &str, generated_at: DateTime<Utc>) -> PdfLayout {
    let mut cursor = Cursor::new();

    cursor.draw(MARGIN, TITLE_SIZE, true, title);
    cursor.advance(30.0);
    cursor.draw(
        MARGIN,
        BODY_SIZE,
        false,
        &format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
    );
    cursor.advance(25.0);

    cursor.draw(MARGIN, HEADING_SIZE, true, "Milestones:");
    cursor.advance(18.0);
    for milestone in &plan.milestones {
        cursor.paragraph(MARGIN + 10.0, 14.0, Some(LINE_BREAK_FLOOR), &format!("- {}", milestone));
    }
    cursor.advance(8.0);

    for week in &plan.weeks {
        cursor.break_below(WEEK_BREAK_FLOOR);
        cursor.draw(MARGIN, HEADING_SIZE, true, &week.label);
        cursor.advance(16.0);

        for task in &week.tasks {
            cursor.paragraph(MARGIN + 8.0, 12.0, Some(LINE_BREAK_FLOOR), &format!("- {}", task));
        }
        if !week.resources.is_empty() {
            let shown: Vec<&str> = week
                .resources
                .iter()
                .take(MAX_PDF_RESOURCES)
                .map(String::as_str)
                .collect();
            cursor.paragraph(MARGIN + 8.0, 14.0, Some(LINE_BREAK_FLOOR), &format!("Resources: {}", shown.join(", ")));
        }
        if !week.reflection.is_empty() {
            cursor.paragraph(MARGIN + 8.0, 12.0, Some(LINE_BREAK_FLOOR), &format!("Reflection: {}", week.reflection));
        }
        if !week.mentor_tip.is_empty() {
            cursor.paragraph(MARGIN + 8.0, 18.0, Some(LINE_BREAK_FLOOR), &format!("Tip: {}", week.mentor_tip));
        }
    }

    cursor.break_below(WEEK_BREAK_FLOOR);
    cursor.draw(MARGIN, HEADING_SIZE, true, "Mentor Notes:");
    cursor.advance(16.0);
    for line in plan.mentor_notes.split('\n') {
        cursor.paragraph(MARGIN + 8.0, 12.0, Some(LINE_BREAK_FLOOR), line);
    }

    let page_count = cursor.lines.last().map(|l| l.page + 1).unwrap_or(1);
    PdfLayout {
        page_count,
        lines: cursor.lines,
    }
}

pub fn render_layout(layout: &PdfLayout, title: &str) -> Result<Vec<u8>> {
    let width = Mm::from(Pt(PAGE_WIDTH));
    let height = Mm::from(Pt(PAGE_HEIGHT));

    let (doc, first_page, first_layer) = PdfDocument::new(sanitize(title), width, height, "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| pdf_error("loading Helvetica", e))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| pdf_error("loading Helvetica-Bold", e))?;

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..layout.page_count.max(1) {
        let (page, layer) = doc.add_page(width, height, "Layer 1");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for line in &layout.lines {
        let Some(layer) = layers.get(line.page) else {
            continue;
        };
        let font = if line.bold { &bold } else { &regular };
        layer.use_text(
            line.text.clone(),
            line.size,
            Mm::from(Pt(line.x)),
            Mm::from(Pt(line.y)),
            font,
        );
    }

    drop(layers);
    doc.save_to_bytes().map_err(|e| pdf_error("writing document", e))
}

/// Lays out and renders `plan` in one step.
pub fn create_pdf_bytes(plan: &Plan, title: &str, generated_at: DateTime<Utc>) -> Result<Vec<u8>> {
    let layout = layout_plan(plan, title, generated_at);
    tracing::debug!("PDF layout: {} lines on {} pages", layout.lines.len(), layout.page_count);
    render_layout(&layout, title)
}

fn pdf_error<E: std::fmt::Debug>(stage: &str, e: E) -> PlannerError {
    PlannerError::PdfError {
        message: format!("{}: {:?}", stage, e),
    }
}

/// The builtin fonts only cover a Latin-1 code page.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '•' | '–' | '—' | '−' => '-',
            '‘' | '’' => '\'',
            '“' | '”' => '"',
            ' '..='~' | '\u{a0}'..='\u{ff}' => c,
            '\t' => ' ',
            _ => '?',
        })
        .collect()
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        // 超長單字直接切斷
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }

        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

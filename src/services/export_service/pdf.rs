use crate::models::psi::{AuditFinding, ExportOptions, MetricSet, Report};
use chrono::{DateTime, Utc};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

// A4 portrait, in points.
const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 40.0;
const TABLE_GAP: f64 = 14.0;
const LINE_HEIGHT: f64 = 12.0;
const CELL_PADDING: f64 = 4.0;
const BODY_SIZE: f64 = 9.0;
const HEADING_SIZE: f64 = 12.0;
const TITLE_SIZE: f64 = 18.0;
// Helvetica's average glyph width as a fraction of the font size; good
// enough for estimating how many characters fit in a cell.
const AVG_GLYPH_WIDTH: f64 = 0.5;

struct Column {
    header: &'static str,
    width: f64,
    wrap: bool,
}

impl Column {
    fn plain(header: &'static str, width: f64) -> Self {
        Self {
            header,
            width,
            wrap: false,
        }
    }

    fn wrapping(header: &'static str, width: f64) -> Self {
        Self {
            header,
            width,
            wrap: true,
        }
    }
}

/// Renders the report as a two-page PDF: summary, scores and the mobile
/// section on page one, the desktop section on a fresh page two.
pub fn export_pdf(report: &Report, options: &ExportOptions) -> anyhow::Result<Vec<u8>> {
    render_pdf(report, options, Utc::now())
}

fn render_pdf(
    report: &Report,
    options: &ExportOptions,
    generated_at: DateTime<Utc>,
) -> anyhow::Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => regular, "F2" => bold },
    });

    let mut kids: Vec<Object> = Vec::new();
    for composer in [
        summary_page(report, options, generated_at),
        desktop_page(report, options),
    ] {
        let content = Content {
            operations: composer.ops,
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn summary_page(
    report: &Report,
    options: &ExportOptions,
    generated_at: DateTime<Utc>,
) -> PageComposer {
    let mut page = PageComposer::new();

    page.title("PageSpeed Insights Report");
    page.line(&format!("URL: {}", report.url));
    page.line(&format!(
        "Date: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    page.gap(TABLE_GAP);

    page.table(
        &[Column::plain("Platform", 130.0), Column::plain("Score", 60.0)],
        &[
            vec![
                "Mobile Score".to_string(),
                report.mobile.performance.to_string(),
            ],
            vec![
                "Desktop Score".to_string(),
                report.desktop.performance.to_string(),
            ],
        ],
    );
    page.gap(TABLE_GAP);

    page.table(
        &[Column::plain("Category", 170.0), Column::plain("Score", 60.0)],
        &[
            vec![
                "Mobile Accessibility".to_string(),
                report.mobile.accessibility.to_string(),
            ],
            vec![
                "Mobile Best Practices".to_string(),
                report.mobile.best_practices.to_string(),
            ],
            vec!["Mobile SEO".to_string(), report.mobile.seo.to_string()],
            vec![
                "Desktop Accessibility".to_string(),
                report.desktop.accessibility.to_string(),
            ],
            vec![
                "Desktop Best Practices".to_string(),
                report.desktop.best_practices.to_string(),
            ],
            vec!["Desktop SEO".to_string(), report.desktop.seo.to_string()],
        ],
    );

    page.gap(TABLE_GAP);
    page.heading("Mobile Metrics");
    page.table(&metric_columns(), &metric_rows(&report.mobile.metrics));

    if options.include_mobile_audits && !report.mobile.audits.is_empty() {
        page.gap(TABLE_GAP);
        page.heading("Mobile Opportunities");
        page.table(
            &opportunity_columns(),
            &opportunity_rows(&report.mobile.audits),
        );
    }

    page
}

fn desktop_page(report: &Report, options: &ExportOptions) -> PageComposer {
    let mut page = PageComposer::new();

    page.heading("Desktop Metrics");
    page.table(&metric_columns(), &metric_rows(&report.desktop.metrics));

    if options.include_desktop_audits && !report.desktop.audits.is_empty() {
        page.gap(TABLE_GAP);
        page.heading("Desktop Opportunities");
        page.table(
            &opportunity_columns(),
            &opportunity_rows(&report.desktop.audits),
        );
    }

    page
}

fn metric_columns() -> [Column; 3] {
    [
        Column::plain("Metric", 70.0),
        Column::plain("Value", 110.0),
        Column::plain("Score", 60.0),
    ]
}

fn metric_rows(metrics: &MetricSet) -> Vec<Vec<String>> {
    metrics
        .entries()
        .iter()
        .map(|(key, sample)| {
            vec![
                key.to_uppercase(),
                sample
                    .display_value
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string()),
                match sample.score {
                    Some(score) => ((score * 100.0).round() as i64).to_string(),
                    None => "-".to_string(),
                },
            ]
        })
        .collect()
}

// The description column is the wide, wrapping one; everything else clips.
fn opportunity_columns() -> [Column; 4] {
    [
        Column::plain("Category", 75.0),
        Column::wrapping("Opportunity", 130.0),
        Column::wrapping("Description", 210.0),
        Column::wrapping("Savings", 100.0),
    ]
}

fn opportunity_rows(audits: &[AuditFinding]) -> Vec<Vec<String>> {
    audits
        .iter()
        .map(|audit| {
            vec![
                audit.category.as_str().to_uppercase(),
                audit.title.clone(),
                audit.description.clone(),
                audit
                    .display_value
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect()
}

// Accumulates one page's content stream. The cursor is measured from the
// top edge and every table starts where the previous element ended, so the
// layout flows vertically without fixed positions.
struct PageComposer {
    ops: Vec<Operation>,
    cursor: f64,
}

impl PageComposer {
    fn new() -> Self {
        Self {
            ops: Vec::new(),
            cursor: MARGIN,
        }
    }

    fn title(&mut self, text: &str) {
        self.cursor += TITLE_SIZE;
        self.draw_text(MARGIN, self.cursor, "F2", TITLE_SIZE, text);
        self.cursor += 8.0;
    }

    fn heading(&mut self, text: &str) {
        self.cursor += HEADING_SIZE;
        self.draw_text(MARGIN, self.cursor, "F2", HEADING_SIZE, text);
        self.cursor += 6.0;
    }

    fn line(&mut self, text: &str) {
        self.cursor += LINE_HEIGHT;
        self.draw_text(MARGIN, self.cursor, "F1", BODY_SIZE, text);
    }

    fn gap(&mut self, dy: f64) {
        self.cursor += dy;
    }

    // Draws a ruled table at the cursor and leaves the cursor at its end.
    // Rows that would start below the bottom margin are clipped; the layout
    // is fixed at two pages.
    fn table(&mut self, columns: &[Column], rows: &[Vec<String>]) {
        let x0 = MARGIN;
        let table_width: f64 = columns.iter().map(|c| c.width).sum();
        let top = self.cursor;

        self.draw_hline(x0, x0 + table_width, top);
        let mut x = x0;
        for column in columns {
            self.draw_text(
                x + CELL_PADDING,
                top + CELL_PADDING + BODY_SIZE,
                "F2",
                BODY_SIZE,
                column.header,
            );
            x += column.width;
        }
        self.cursor = top + LINE_HEIGHT + 2.0 * CELL_PADDING;
        self.draw_hline(x0, x0 + table_width, self.cursor);

        for row in rows {
            let row_top = self.cursor;
            if row_top + LINE_HEIGHT + 2.0 * CELL_PADDING > PAGE_HEIGHT - MARGIN {
                break;
            }

            let mut cells: Vec<Vec<String>> = Vec::new();
            let mut line_count = 1usize;
            for (column, cell) in columns.iter().zip(row) {
                let capacity = cell_capacity(column.width);
                let lines = if column.wrap {
                    wrap_text(cell, capacity)
                } else {
                    vec![clip_text(cell, capacity)]
                };
                line_count = line_count.max(lines.len());
                cells.push(lines);
            }

            let mut x = x0;
            for (column, lines) in columns.iter().zip(&cells) {
                for (index, line) in lines.iter().enumerate() {
                    self.draw_text(
                        x + CELL_PADDING,
                        row_top + CELL_PADDING + BODY_SIZE + index as f64 * LINE_HEIGHT,
                        "F1",
                        BODY_SIZE,
                        line,
                    );
                }
                x += column.width;
            }

            self.cursor = row_top + line_count as f64 * LINE_HEIGHT + 2.0 * CELL_PADDING;
            self.draw_hline(x0, x0 + table_width, self.cursor);
        }

        let mut x = x0;
        for column in columns {
            self.draw_vline(x, top, self.cursor);
            x += column.width;
        }
        self.draw_vline(x0 + table_width, top, self.cursor);
    }

    fn draw_text(&mut self, x: f64, baseline_from_top: f64, font: &str, size: f64, text: &str) {
        let y = PAGE_HEIGHT - baseline_from_top;
        self.ops.push(Operation::new("BT", vec![]));
        self.ops
            .push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(ascii(text))],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn draw_hline(&mut self, x1: f64, x2: f64, y_from_top: f64) {
        let y = PAGE_HEIGHT - y_from_top;
        self.stroke(x1, y, x2, y);
    }

    fn draw_vline(&mut self, x: f64, top_from_top: f64, bottom_from_top: f64) {
        self.stroke(x, PAGE_HEIGHT - top_from_top, x, PAGE_HEIGHT - bottom_from_top);
    }

    fn stroke(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.ops.push(Operation::new("w", vec![0.5.into()]));
        self.ops.push(Operation::new(
            "RG",
            vec![0.6.into(), 0.6.into(), 0.6.into()],
        ));
        self.ops
            .push(Operation::new("m", vec![x1.into(), y1.into()]));
        self.ops
            .push(Operation::new("l", vec![x2.into(), y2.into()]));
        self.ops.push(Operation::new("S", vec![]));
    }
}

fn cell_capacity(width: f64) -> usize {
    (((width - 2.0 * CELL_PADDING) / (AVG_GLYPH_WIDTH * BODY_SIZE)) as usize).max(1)
}

// Helvetica via the base-14 fonts covers ASCII; anything else is replaced.
fn ascii(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        for piece in split_long_word(word, max_chars) {
            let needed = if current.is_empty() {
                piece.len()
            } else {
                current.len() + 1 + piece.len()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&piece);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn split_long_word(word: &str, max_chars: usize) -> Vec<String> {
    if word.chars().count() <= max_chars {
        return vec![word.to_string()];
    }
    word.chars()
        .collect::<Vec<_>>()
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn clip_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}

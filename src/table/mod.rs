// src/table/mod.rs

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

static TABLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("CSS selector for tables should be valid"));

/// Bracketed footnote markers left in cell text, e.g. `[12]` or `[n 3]`.
static FOOTNOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("footnote regex should compile"));

/// Upper bound for `rowspan` / `colspan`; browsers clamp these too.
const MAX_SPAN: usize = 1000;

/// One `<table>` flattened into a rectangular grid of cell texts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HtmlTable {
    /// Position among all `<table>` elements of the document, in document order.
    pub index: usize,
    pub caption: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl HtmlTable {
    /// Column position of the header named exactly `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

struct RawCell {
    text: String,
    rowspan: usize,
    colspan: usize,
}

struct RawRow {
    cells: Vec<RawCell>,
    /// Every cell is a `<th>`; leading rows like this form the header.
    all_header: bool,
}

/// Parse every `<table>` in `html`, nested ones included.
pub fn parse_tables(html: &str) -> Vec<HtmlTable> {
    let doc = Html::parse_document(html);
    doc.select(&TABLE_SELECTOR)
        .enumerate()
        .map(|(index, table)| parse_table(index, table))
        .collect()
}

fn parse_table(index: usize, table: ElementRef<'_>) -> HtmlTable {
    let caption = table
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "caption")
        .map(cell_text)
        .filter(|c| !c.is_empty());

    let raw_rows: Vec<RawRow> = table_rows(table).into_iter().map(raw_row).collect();
    let header_count = raw_rows.iter().take_while(|r| r.all_header).count();
    let mut grid = expand_spans(raw_rows);

    let data = grid.split_off(header_count);
    let mut headers = merge_header_rows(&grid);

    let width = data
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    headers.resize(width, String::new());

    let rows = data
        .into_iter()
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .map(|mut row| {
            row.resize(width, String::new());
            row
        })
        .collect();

    HtmlTable {
        index,
        caption,
        headers,
        rows,
    }
}

/// Direct rows of `table`, looking through `thead`/`tbody`/`tfoot` but not
/// into nested tables.
fn table_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| el.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

fn raw_row(tr: ElementRef<'_>) -> RawRow {
    let mut all_header = true;
    let cells: Vec<RawCell> = tr
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "th" | "td"))
        .map(|el| {
            if el.value().name() != "th" {
                all_header = false;
            }
            RawCell {
                text: cell_text(el),
                rowspan: span_attr(el, "rowspan"),
                colspan: span_attr(el, "colspan"),
            }
        })
        .collect();
    RawRow {
        all_header: all_header && !cells.is_empty(),
        cells,
    }
}

fn span_attr(el: ElementRef<'_>, name: &str) -> usize {
    el.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, MAX_SPAN)
}

/// Lay cells out on a grid, repeating spanned cells into every slot they cover.
fn expand_spans(rows: Vec<RawRow>) -> Vec<Vec<String>> {
    // per column: text still owed to the rows below, and how many rows
    let mut carry: Vec<Option<(String, usize)>> = Vec::new();
    let mut grid = Vec::with_capacity(rows.len());

    for raw in rows {
        let mut row: Vec<String> = Vec::new();
        let mut cells = raw.cells.into_iter();
        loop {
            if let Some(text) = take_carry(&mut carry, row.len()) {
                row.push(text);
                continue;
            }
            let Some(cell) = cells.next() else { break };
            for _ in 0..cell.colspan {
                let col = row.len();
                if cell.rowspan > 1 {
                    if carry.len() <= col {
                        carry.resize(col + 1, None);
                    }
                    carry[col] = Some((cell.text.clone(), cell.rowspan - 1));
                }
                row.push(cell.text.clone());
            }
        }
        // spans hanging past the last explicit cell of this row
        while carry[row.len().min(carry.len())..].iter().any(Option::is_some) {
            let text = take_carry(&mut carry, row.len()).unwrap_or_default();
            row.push(text);
        }
        grid.push(row);
    }
    grid
}

fn take_carry(carry: &mut [Option<(String, usize)>], col: usize) -> Option<String> {
    let slot = carry.get_mut(col)?;
    let (text, left) = slot.as_mut()?;
    let out = text.clone();
    *left -= 1;
    if *left == 0 {
        *slot = None;
    }
    Some(out)
}

/// Collapse stacked header rows into one name per column.
fn merge_header_rows(rows: &[Vec<String>]) -> Vec<String> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|col| {
            let mut parts: Vec<&str> = Vec::new();
            for row in rows {
                let Some(text) = row.get(col) else { continue };
                if !text.is_empty() && parts.last() != Some(&text.as_str()) {
                    parts.push(text);
                }
            }
            parts.join(" ")
        })
        .collect()
}

/// Visible text of a cell with footnotes, hidden sort keys and inline
/// styles removed and whitespace collapsed.
pub fn cell_text(el: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(el, &mut raw);
    FOOTNOTE_RE
        .replace_all(&raw, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else { continue };
                if is_hidden(child_el) {
                    continue;
                }
                let block = matches!(
                    child_el.value().name(),
                    "br" | "div" | "p" | "li" | "ul" | "ol" | "table" | "tr" | "td" | "th"
                );
                if block {
                    out.push(' ');
                }
                collect_text(child_el, out);
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn is_hidden(el: ElementRef<'_>) -> bool {
    let value = el.value();
    if matches!(value.name(), "style" | "script") {
        return true;
    }
    let is_reference = value
        .attr("class")
        .map(|classes| classes.split_whitespace().any(|c| c == "reference"))
        .unwrap_or(false);
    if is_reference {
        return true;
    }
    value
        .attr("style")
        .map(|style| {
            style
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .contains("display:none")
        })
        .unwrap_or(false)
}

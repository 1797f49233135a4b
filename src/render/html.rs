//! HTML output for rendered pages.

use std::fmt::Write;

use super::chart::{self, DEFAULT_SIZE};
use super::{Block, Page, Table};
use crate::error::Result;

const STYLE: &str = "\
body { margin: 0; font-family: sans-serif; color: #262730; }
.layout { display: flex; min-height: 100vh; }
aside { width: 18rem; padding: 2rem 1rem; background: #f0f2f6; }
main { flex: 1; padding: 2rem 3rem; overflow-x: auto; }
table { border-collapse: collapse; font-size: 0.85rem; margin-bottom: 1.5rem; }
th, td { border: 1px solid #e6e9ef; padding: 0.25rem 0.5rem; text-align: right; }
th { background: #fafafa; }
.scroll { max-height: 24rem; overflow-y: auto; }
.banner { padding: 0.75rem 1rem; border-radius: 0.5rem; margin: 0.5rem 0; }
.info { background: #e8f0fe; color: #1c4f9c; }
.success { background: #e6f4ea; color: #1e6b35; }
.error { background: #fdecea; color: #9b1c1c; }
.caption { color: #808495; font-size: 0.85rem; }
label { display: block; margin-bottom: 0.5rem; }
input[type=text] { width: 100%; padding: 0.4rem; box-sizing: border-box; }
";

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a full HTML document. Charts are inlined as SVG.
pub fn to_html(page: &Page) -> Result<String> {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(out, "<title>{}</title>", escape(&page.title))?;
    writeln!(out, "<style>\n{}</style>", STYLE)?;
    out.push_str("</head>\n<body>\n<div class=\"layout\">\n<aside>\n");
    for block in &page.sidebar {
        push_block(&mut out, block)?;
    }
    out.push_str("</aside>\n<main>\n");
    writeln!(out, "<h1>{}</h1>", escape(&page.title))?;
    for block in &page.main {
        push_block(&mut out, block)?;
    }
    out.push_str("</main>\n</div>\n</body>\n</html>\n");
    Ok(out)
}

/// Minimal page for a render pass that failed outright.
pub fn error_page(title: &str, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n\
         <pre class=\"error\">{message}</pre>\n</body>\n</html>\n",
        title = escape(title),
        message = escape(message),
    )
}

fn push_block(out: &mut String, block: &Block) -> Result<()> {
    match block {
        Block::Header(text) => writeln!(out, "<h2>{}</h2>", escape(text))?,
        Block::Info(text) => push_banner(out, "info", text)?,
        Block::Success(text) => push_banner(out, "success", text)?,
        Block::Error(text) => push_banner(out, "error", text)?,
        Block::Caption(text) => writeln!(out, "<p class=\"caption\">{}</p>", escape(text))?,
        Block::Table(table) => push_table(out, table)?,
        Block::TextInput { name, label, value } => writeln!(
            out,
            "<form method=\"get\" action=\"/\">\n\
             <label for=\"{name}\">{label}</label>\n\
             <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\">\n\
             </form>",
            name = escape(name),
            label = escape(label),
            value = escape(value),
        )?,
        Block::Chart(scatter) => {
            let svg = chart::draw_svg(scatter, DEFAULT_SIZE)?;
            writeln!(out, "<figure>\n{}\n</figure>", svg)?;
        }
    }
    Ok(())
}

fn push_banner(out: &mut String, class: &str, text: &str) -> Result<()> {
    writeln!(out, "<div class=\"banner {}\">{}</div>", class, escape(text))?;
    Ok(())
}

fn push_table(out: &mut String, table: &Table) -> Result<()> {
    out.push_str("<div class=\"scroll\">\n<table>\n<thead><tr><th></th>");
    for header in &table.headers {
        write!(out, "<th>{}</th>", escape(header))?;
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for (index, row) in table.rows.iter().enumerate() {
        write!(out, "<tr><th>{}</th>", index)?;
        for cell in row {
            write!(out, "<td>{}</td>", escape(cell))?;
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n</div>\n");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup_characters() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn table_rows_are_indexed_from_zero() {
        let mut out = String::new();
        push_table(
            &mut out,
            &Table {
                headers: vec!["Planet".to_string()],
                rows: vec![vec!["Earth".to_string()], vec!["Mars".to_string()]],
            },
        )
        .unwrap();

        assert!(out.contains("<tr><th>0</th><td>Earth</td></tr>"));
        assert!(out.contains("<tr><th>1</th><td>Mars</td></tr>"));
    }

    #[test]
    fn text_input_value_is_escaped() {
        let mut page = Page::new("t");
        page.sidebar.push(Block::TextInput {
            name: "host".to_string(),
            label: "Host star name".to_string(),
            value: "\"><script>".to_string(),
        });
        let html = to_html(&page).unwrap();
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn error_page_escapes_message() {
        let html = error_page("Render failed", "a < b");
        assert!(html.contains("a &lt; b"));
    }
}

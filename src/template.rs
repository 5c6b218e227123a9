//! The fixed HTML document shell wrapped around the assembled sections.
//!
//! Everything the print renderer needs lives here: embedded font faces, the
//! print stylesheet, `@page` margin boxes for the running header and page
//! numbers, `target-counter()` page references after every in-document link,
//! and the cover page. Relative URLs (`fonts/…`, `logo.png`) are resolved by
//! the PDF renderer against the working directory.
//!
//! The shell is deliberately not configurable at runtime.

/// Manual title, used for `<title>`.
pub const TITLE: &str = "Furnace Manual";

/// Document prologue, up to the opening `<title>` tag.
pub const SHELL_PROLOGUE: &str = r#"<!DOCTYPE html>
<html lang="en">
	<head>
		<meta charset="utf-8"/>
		<title>"#;

/// Everything else before the sections: stylesheet and the cover.
pub const SHELL_HEAD: &str = r#"</title>
		<style>
			@font-face {
				font-family: 'IBM Plex Sans';
				font-weight: normal;
				font-style: normal;
				src: url("fonts/IBMPlexSans-Regular.ttf") format("truetype");
			}
			@font-face {
				font-family: 'IBM Plex Sans';
				font-weight: bold;
				font-style: normal;
				src: url("fonts/IBMPlexSans-Bold.ttf") format("truetype");
			}
			@font-face {
				font-family: 'IBM Plex Sans';
				font-weight: normal;
				font-style: oblique;
				src: url("fonts/IBMPlexSans-Italic.ttf") format("truetype");
			}
			@font-face {
				font-family: 'IBM Plex Sans';
				font-weight: bold;
				font-style: oblique;
				src: url("fonts/IBMPlexSans-BoldItalic.ttf") format("truetype");
			}
			body {
				font-family: 'IBM Plex Sans';
				line-height: 1.3;
				font-size: 12pt;
				color: #000;
			}
			section {
				page-break-before: always;
				text-align: justify;
				hyphens: auto;
			}
			h1, h2, h3, h4, h5, h6 {
				hyphens: none;
				text-align: left;
			}
			img {
				max-width: 100%;
			}
			a {
				color: #365788;
				text-decoration: none;
				letter-spacing: .01em;
				font-weight: bold;
			}
			a[href^='#']:after {
				content: ' (page ' target-counter(attr(href), page) ') ';
				color: #000;
			}
			#cover {
				height: 100%;
				text-align: center;
				display: flex;
				flex-direction: column;
			}
			#cover * {
				flex-grow: 1;
			}
			#cover h1 {
				text-align: center;
				font-size: 2.25em;
			}
			pre {
				font-size: .8em;
			}
			table {
				display: block;
				width: 100%;
				width: max-content;
				max-width: 100%;
				overflow: auto;
				border-collapse: collapse;
				text-align: left;
			}
			table tr {
				border-top: 1pt solid #aaa;
			}
			th, td {
				padding: 3pt 6pt;
				border: 1pt solid #ccc;
			}
			th {
				hyphens: none;
				padding: 2pt 4pt;
				text-transform: uppercase;
				font-size: .8em;
			}
			@page {
				margin: 1in 1.25in;
				@bottom-center {
					content: counter(page);
					font-family: 'IBM Plex Sans';
				}
				@top-left {
					content: 'furnace manual';
					font-family: 'IBM Plex Sans';
					font-style: oblique;
				}
			}
			@page:first {
				@bottom-center {
					content: '';
				}
				@top-left {
					content: '';
				}
			}
		</style>
	</head>
	<body>
		<section id="cover">
			<div>
			</div>
			<div>
				<img src="logo.png" style="width: 72pt;">
				<h1>Furnace <br>User Manual</h1>
			</div>
			<div>
				<i>tildearrow and contributors</i>
			</div>
		</section>
"#;

/// Everything after the sections.
pub const SHELL_TAIL: &str = "
	</body>
</html>
";

/// Embed the concatenated section markup in the document shell.
pub fn wrap_document(body: &str) -> String {
    let mut html = String::with_capacity(
        SHELL_PROLOGUE.len() + TITLE.len() + SHELL_HEAD.len() + body.len() + SHELL_TAIL.len(),
    );
    html.push_str(SHELL_PROLOGUE);
    html.push_str(TITLE);
    html.push_str(SHELL_HEAD);
    html.push_str(body);
    html.push_str(SHELL_TAIL);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_a_complete_document() {
        let html = wrap_document("");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.trim_end().ends_with("</html>"));
        assert_eq!(html.matches("<section").count(), 1);
        assert!(html.contains("<section id=\"cover\">"));
    }

    #[test]
    fn body_lands_after_cover_inside_body() {
        let html = wrap_document("<section id=\"x\">X</section>");
        let cover = html.find("id=\"cover\"").unwrap();
        let body = html.find("id=\"x\"").unwrap();
        let end = html.find("</body>").unwrap();
        assert!(cover < body && body < end);
    }

    #[test]
    fn title_is_filled_in() {
        let html = wrap_document("");
        assert!(html.contains(&format!("<title>{TITLE}</title>")));
        assert_eq!(html.matches("<title>").count(), 1);
    }

    #[test]
    fn print_rules_present() {
        assert!(SHELL_HEAD.contains("target-counter(attr(href), page)"));
        assert!(SHELL_HEAD.contains("@page:first"));
        assert!(SHELL_HEAD.contains("@bottom-center"));
        assert!(SHELL_HEAD.contains("fonts/IBMPlexSans-Regular.ttf"));
    }

    #[test]
    fn percentages_are_literal() {
        assert!(SHELL_HEAD.contains("max-width: 100%;"));
        assert!(!SHELL_HEAD.contains("%%"));
    }
}

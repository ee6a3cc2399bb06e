use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::alert::AlertKind;

/// Paragraph text that forces a page break.
const PAGE_BREAK_MARKER: &str = "---pagebreak---";
const PAGE_BREAK_HTML: &str = "<div class=\"page-break\"></div>\n";

/// Strip YAML frontmatter: an opening `---` line directly followed by content,
/// closed by the next line that is exactly `---`.
fn strip_frontmatter(markdown: &str) -> &str {
    let Some(rest) = markdown
        .strip_prefix("---\n")
        .or_else(|| markdown.strip_prefix("---\r\n"))
    else {
        return markdown;
    };
    // A blank line after the opener means a leading horizontal rule
    if rest.starts_with('\n') || rest.starts_with("\r\n") {
        return markdown;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        offset += line.len();
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return rest[offset..].trim_start_matches(['\r', '\n']);
        }
    }
    markdown
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_GFM
}

/// Render markdown text to an HTML fragment with GitHub alerts and heading anchors.
pub fn to_html(markdown: &str) -> String {
    let markdown = strip_frontmatter(markdown);
    let events = rewrite(Parser::new_ext(markdown, options()));

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Plain text of the first level-1 heading, if any.
pub fn first_heading(markdown: &str) -> Option<String> {
    let markdown = strip_frontmatter(markdown);
    let mut text: Option<String> = None;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => text = Some(String::new()),
            Event::Text(t) | Event::Code(t) => {
                if let Some(text) = text.as_mut() {
                    text.push_str(&t);
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                // Empty headings don't make a title; keep looking
                if let Some(title) = text.take().map(|t| t.trim().to_string()) {
                    if !title.is_empty() {
                        return Some(title);
                    }
                }
            }
            _ => {}
        }
    }

    None
}

#[derive(Default)]
struct RewriteState<'a> {
    // One entry per open blockquote; Some for alerts
    quote_stack: Vec<Option<AlertKind>>,
    // Heading currently being buffered
    heading: Option<HeadingBuilder<'a>>,
    slugs: Slugger,
}

struct HeadingBuilder<'a> {
    level: HeadingLevel,
    id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    events: Vec<Event<'a>>,
}

impl<'a> RewriteState<'a> {
    fn emit(&mut self, event: Event<'a>, out: &mut Vec<Event<'a>>) {
        match self.heading.as_mut() {
            Some(heading) => heading.events.push(event),
            None => out.push(event),
        }
    }
}

fn rewrite<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let events: Vec<Event<'a>> = parser.collect();
    let mut out = Vec::with_capacity(events.len());
    let mut state = RewriteState::default();

    let mut i = 0;
    while i < events.len() {
        if let Some(len) = page_break_len(&events[i..]) {
            state.emit(Event::Html(PAGE_BREAK_HTML.into()), &mut out);
            i += len;
            continue;
        }
        process_event(events[i].clone(), &mut state, &mut out);
        i += 1;
    }

    out
}

/// Number of events making up a page-break paragraph at the start of `events`.
fn page_break_len(events: &[Event]) -> Option<usize> {
    if !matches!(events.first(), Some(Event::Start(Tag::Paragraph))) {
        return None;
    }

    let mut text = String::new();
    for (offset, event) in events.iter().enumerate().skip(1) {
        match event {
            Event::Text(t) => text.push_str(t),
            Event::End(TagEnd::Paragraph) => {
                return (text.trim() == PAGE_BREAK_MARKER).then_some(offset + 1);
            }
            _ => return None,
        }
    }
    None
}

fn process_event<'a>(event: Event<'a>, state: &mut RewriteState<'a>, out: &mut Vec<Event<'a>>) {
    match event {
        // Alerts
        Event::Start(Tag::BlockQuote(kind)) => {
            let alert = kind.map(AlertKind::from);
            state.quote_stack.push(alert);
            match alert {
                Some(alert) => state.emit(Event::Html(alert.open_html().into()), out),
                None => state.emit(Event::Start(Tag::BlockQuote(None)), out),
            }
        }
        Event::End(TagEnd::BlockQuote(kind)) => match state.quote_stack.pop().flatten() {
            Some(alert) => state.emit(Event::Html(alert.close_html().into()), out),
            None => state.emit(Event::End(TagEnd::BlockQuote(kind)), out),
        },

        // Headings
        Event::Start(Tag::Heading {
            level,
            id,
            classes,
            attrs,
        }) => {
            state.heading = Some(HeadingBuilder {
                level,
                id,
                classes,
                attrs,
                events: Vec::new(),
            });
        }
        Event::End(TagEnd::Heading(level)) => {
            if let Some(heading) = state.heading.take() {
                let id = match heading.id {
                    Some(id) => id,
                    None => state.slugs.unique(&plain_text(&heading.events)).into(),
                };
                out.push(Event::Start(Tag::Heading {
                    level: heading.level,
                    id: Some(id),
                    classes: heading.classes,
                    attrs: heading.attrs,
                }));
                out.extend(heading.events);
                out.push(Event::End(TagEnd::Heading(level)));
            }
        }

        other => state.emit(other, out),
    }
}

fn plain_text(events: &[Event]) -> String {
    let mut text = String::new();
    for event in events {
        if let Event::Text(t) | Event::Code(t) = event {
            text.push_str(t);
        }
    }
    text
}

/// GitHub-style heading anchors with numbered duplicates.
#[derive(Default)]
struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    fn unique(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{}-{}", base, count)
        };
        *count += 1;
        slug
    }
}

fn slugify(text: &str) -> String {
    text.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .filter_map(|ch| match ch {
            ' ' => Some('-'),
            '-' | '_' => Some(ch),
            ch if ch.is_alphanumeric() => Some(ch),
            _ => None,
        })
        .collect()
}

use crate::board::{ItemElement, LabelElement, SvgBoard};

const ROW_HEIGHT: usize = 56;
const TOP: usize = 40;

pub fn render_index(date: &str, board: &SvgBoard) -> String {
    let rows = board.items().len().max(board.labels().len());
    let height = TOP * 2 + rows * ROW_HEIGHT;

    let groups: String = board
        .items()
        .iter()
        .enumerate()
        .map(|(idx, item)| render_item(idx, item))
        .collect();
    let labels: String = board
        .labels()
        .iter()
        .enumerate()
        .map(|(idx, label)| render_label(idx, label))
        .collect();
    let fallback: String = board
        .items()
        .iter()
        .map(|item| {
            format!(
                r#"<form method="post" action="/toggle/{id}"><button type="submit">{id}</button></form>"#,
                id = escape(&item.id)
            )
        })
        .collect();

    let board_style = if board.board_visible() { "" } else { "display: none" };
    let congrats = match board.congrats() {
        Some(panel) => format!(
            r#"<div id="congrats-message" style="display: {}"><div class="line-1">{}</div><div class="line-2">{}</div></div>"#,
            if panel.visible { "flex" } else { "none" },
            escape(panel.lines[0]),
            escape(panel.lines[1])
        ),
        None => String::new(),
    };

    INDEX_HTML
        .replace("{{DATE}}", &escape(date))
        .replace("{{BOARD_STYLE}}", board_style)
        .replace("{{HEIGHT}}", &height.to_string())
        .replace("{{GROUPS}}", &groups)
        .replace("{{LABELS}}", &labels)
        .replace("{{FALLBACK}}", &fallback)
        .replace("{{CONGRATS}}", &congrats)
}

fn render_item(idx: usize, item: &ItemElement) -> String {
    let y = TOP + idx * ROW_HEIGHT;
    let mut attrs = format!(r#"id="{}" class="{}""#, escape(&item.id), item.classes.join(" "));
    if let Some(role) = &item.role {
        attrs.push_str(&format!(r#" role="{}""#, escape(role)));
    }
    if let Some(tabindex) = item.tabindex {
        attrs.push_str(&format!(r#" tabindex="{tabindex}""#));
    }
    if let Some(pressed) = item.aria_pressed {
        attrs.push_str(&format!(r#" aria-pressed="{pressed}""#));
    }
    format!(
        r#"<g {attrs}><rect class="hit" x="24" y="{top}" width="392" height="44" rx="14" /><circle class="box" cx="52" cy="{cy}" r="12" /><path class="tick" d="M45 {cy} l5 6 l10 -12" /></g>"#,
        top = y,
        cy = y + 22
    )
}

fn render_label(idx: usize, label: &LabelElement) -> String {
    let y = TOP + idx * ROW_HEIGHT + 28;
    let opacity = label
        .opacity
        .as_deref()
        .map(|value| format!(r#" style="opacity: {value}""#))
        .unwrap_or_default();
    format!(
        r#"<text x="80" y="{y}" class="{}"{opacity}>{}</text>"#,
        label.classes.join(" "),
        escape(&label.text)
    )
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Daily Checklist</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f3f6ea;
      --bg-2: #cfe3c2;
      --ink: #2b2a28;
      --accent: #4f8a5b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 58, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eef4e1 60%, #f6f8f0 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .board {
      width: min(480px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      margin: 0 0 4px;
    }

    .subtitle {
      margin: 0 0 12px;
      color: #5f5c57;
    }

    #page {
      width: 100%;
      touch-action: manipulation;
    }

    #page g {
      cursor: pointer;
    }

    #page .hit {
      fill: transparent;
    }

    #page .box {
      fill: white;
      stroke: var(--accent);
      stroke-width: 2;
    }

    #page .tick {
      fill: none;
      stroke: white;
      stroke-width: 3;
      opacity: 0;
    }

    #page g.is-checked .box {
      fill: var(--accent);
    }

    #page g.is-checked .tick {
      opacity: 1;
    }

    #page text {
      font-size: 18px;
      pointer-events: none;
    }

    #page text.is-done {
      text-decoration: line-through;
    }

    #congrats-message {
      flex-direction: column;
      align-items: center;
      gap: 8px;
      font-family: "Fraunces", "Georgia", serif;
    }

    #congrats-message .line-1 {
      font-size: 2rem;
    }

    #congrats-message .line-2 {
      color: var(--accent);
    }

    .fallback form {
      display: inline;
    }
  </style>
</head>
<body>
  <main class="board" style="{{BOARD_STYLE}}">
    <h1>Daily Checklist</h1>
    <p class="subtitle">{{DATE}}</p>
    <svg id="page" viewBox="0 0 440 {{HEIGHT}}" xmlns="http://www.w3.org/2000/svg">
      {{GROUPS}}
      {{LABELS}}
    </svg>
    <noscript><div class="fallback">{{FALLBACK}}</div></noscript>
  </main>
  {{CONGRATS}}

  <script>
    const svg = document.getElementById('page');

    const send = async (payload) => {
      const res = await fetch('/api/input', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(payload)
      });
      if (res.ok) {
        window.location.reload();
      }
    };

    const targetOf = (event) => {
      const group = event.target.closest('g[id^="button."]');
      return group ? group.getAttribute('id') : null;
    };

    if (svg) {
      svg.addEventListener('pointerup', (event) => {
        const target = targetOf(event);
        if (target) {
          send({ kind: 'pointerup', target });
        }
      });

      svg.addEventListener('keydown', (event) => {
        const target = targetOf(event);
        if (target && (event.key === 'Enter' || event.key === ' ')) {
          event.preventDefault();
          send({ kind: 'keydown', target, key: event.key });
        }
      });
    }
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ChecklistLayout;
    use crate::surface::ChecklistSurface;

    #[test]
    fn render_marks_checked_items_and_muted_labels() {
        let mut board = SvgBoard::from_layout(&ChecklistLayout::from_labels(["sun", "<b>"]));
        board.set_item_checked("button.1", true);
        board.set_label_muted(0, true);
        board.set_item_checked("button.2", false);

        let html = render_index("2024-03-05", &board);
        assert!(html.contains(r#"id="button.1" class="is-checked" role="button" tabindex="0" aria-pressed="true""#));
        assert!(html.contains(r#"aria-pressed="false""#));
        assert!(html.contains(r#"class="is-done" style="opacity: 0.5">sun</text>"#));
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("congrats-message\" style"));
    }

    #[test]
    fn render_shows_congrats_when_board_hidden() {
        let mut board = SvgBoard::from_layout(&ChecklistLayout::from_labels(["sun"]));
        board.set_board_visible(false);
        board.set_congrats_visible(true);

        let html = render_index("2024-03-05", &board);
        assert!(html.contains(r#"<main class="board" style="display: none">"#));
        assert!(html.contains(r#"<div id="congrats-message" style="display: flex">"#));
        assert!(html.contains("You did good for today"));
        assert!(html.contains("See you tomorrow!"));
    }
}

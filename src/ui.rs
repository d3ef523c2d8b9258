use crate::charts::ChartKind;
use crate::models::{CatchForm, CatchId, CatchRow, PageResponse};

pub fn render_index(page: &PageResponse, notice: Option<&str>) -> String {
    let rows = if page.rows.is_empty() {
        r#"<tr><td colspan="9" class="empty">No catches yet</td></tr>"#.to_string()
    } else {
        page.rows.iter().map(render_row).collect::<Vec<_>>().join("\n")
    };

    let form = render_form("/catches", &CatchForm::default(), "Log Catch", false);

    layout(
        "Catch Log",
        // Page numbers first, user-supplied text last.
        &INDEX_HTML
            .replace("{{PAGE}}", &page.page.to_string())
            .replace("{{TOTAL_PAGES}}", &page.total_pages.to_string())
            .replace("{{MATCHES}}", &page.total_matches.to_string())
            .replace("{{PREV_PAGE}}", &page.page.saturating_sub(1).to_string())
            .replace("{{NEXT_PAGE}}", &(page.page + 1).to_string())
            .replace("{{PREV_DISABLED}}", disabled(!page.has_previous))
            .replace("{{NEXT_DISABLED}}", disabled(!page.has_next))
            .replace("{{FORM}}", &form)
            .replace("{{NOTICE}}", &render_notice(notice))
            .replace("{{KEYWORD}}", &escape_html(&page.keyword))
            .replace("{{ROWS}}", &rows),
    )
}

pub fn render_edit(id: CatchId, form: &CatchForm, error: Option<&str>) -> String {
    let action = format!("/catches/{id}");
    layout(
        "Edit Catch",
        &EDIT_HTML
            .replace("{{NOTICE}}", &render_notice(error))
            .replace("{{FORM}}", &render_form(&action, form, "Save Changes", true)),
    )
}

pub fn render_charts(selected: ChartKind) -> String {
    let options = ChartKind::ALL
        .iter()
        .map(|kind| {
            let marker = if *kind == selected { " selected" } else { "" };
            format!(
                r#"<option value="{}"{marker}>{}</option>"#,
                kind.slug(),
                kind.title()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    layout("Catch Charts", &CHARTS_HTML.replace("{{OPTIONS}}", &options))
}

fn render_row(row: &CatchRow) -> String {
    let number = |value: Option<f64>| value.map(|n| n.to_string()).unwrap_or_default();
    format!(
        r#"<tr>
  <td>{date}</td>
  <td>{time}</td>
  <td>{location}</td>
  <td>{species}</td>
  <td>{length}</td>
  <td>{weight}</td>
  <td>{temperature}</td>
  <td>{bait}</td>
  <td class="row-actions">
    <a class="edit" href="/catches/{id}/edit">Edit</a>
    <form method="post" action="/catches/{id}/delete" onsubmit="return confirm('Delete this catch?');">
      <button class="delete" type="submit">Delete</button>
    </form>
  </td>
</tr>"#,
        id = row.id,
        date = escape_html(&row.date),
        time = escape_html(&row.time),
        location = escape_html(&row.location),
        species = escape_html(&row.species),
        length = number(row.length_in),
        weight = number(row.weight_lbs),
        temperature = number(row.temperature),
        bait = escape_html(row.bait.as_deref().unwrap_or_default()),
    )
}

/// Date and time are only enforced when editing; a new catch without them is
/// stamped with the current moment.
fn render_form(action: &str, form: &CatchForm, submit: &str, editing: bool) -> String {
    let required = if editing { " required" } else { "" };
    format!(
        r#"<form class="catch-form" method="post" action="{action}">
  <label>Date <input type="date" name="date" value="{date}"{required} /></label>
  <label>Time <input type="time" name="time" value="{time}"{required} /></label>
  <label>Location <input type="text" name="location" value="{location}" required /></label>
  <label>Species <input type="text" name="species" value="{species}" required /></label>
  <label>Length (in) <input type="number" step="0.01" min="0" name="length_in" value="{length}" required /></label>
  <label>Weight (lbs) <input type="number" step="0.01" min="0" name="weight_lbs" value="{weight}" required /></label>
  <label>Temperature <input type="number" step="0.1" name="temperature" value="{temperature}" /></label>
  <label>Bait <input type="text" name="bait" value="{bait}" /></label>
  <button type="submit">{submit}</button>
</form>"#,
        date = escape_html(&form.date),
        time = escape_html(&form.time),
        location = escape_html(&form.location),
        species = escape_html(&form.species),
        length = escape_html(&form.length_in),
        weight = escape_html(&form.weight_lbs),
        temperature = escape_html(&form.temperature),
        bait = escape_html(&form.bait),
    )
}

fn render_notice(notice: Option<&str>) -> String {
    match notice {
        Some(message) => format!(r#"<p class="notice" role="alert">{}</p>"#, escape_html(message)),
        None => String::new(),
    }
}

fn disabled(flag: bool) -> &'static str {
    if flag { "disabled" } else { "" }
}

fn layout(title: &str, body: &str) -> String {
    LAYOUT_HTML
        .replace("{{TITLE}}", title)
        .replace("{{BODY}}", body)
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #e6f1f8;
      --bg-2: #a7cdf5;
      --ink: #24313a;
      --accent: #2f7d6d;
      --accent-2: #2f4858;
      --danger: #c2453d;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #d4ecff 60%, #eef6fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    nav {
      display: flex;
      gap: 16px;
    }

    nav a {
      color: var(--accent-2);
      font-weight: 600;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      margin: 0;
    }

    .notice {
      margin: 0;
      padding: 12px 16px;
      border-radius: 14px;
      background: #fde8e6;
      color: var(--danger);
    }

    .catch-form {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 12px;
      align-items: end;
    }

    .catch-form label {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
      color: #5f6b73;
    }

    input, select {
      padding: 8px 10px;
      border-radius: 10px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      font: inherit;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button:disabled {
      opacity: 0.4;
      cursor: default;
    }

    button.delete {
      background: var(--danger);
      padding: 6px 12px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.95rem;
    }

    th, td {
      padding: 8px 10px;
      text-align: left;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .row-actions {
      display: flex;
      gap: 8px;
      align-items: center;
    }

    .row-actions form {
      margin: 0;
    }

    .empty {
      text-align: center;
      color: #8b857d;
    }

    .pager {
      display: flex;
      gap: 12px;
      align-items: center;
      justify-content: center;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }
  </style>
</head>
<body>
  <main class="app">
    <nav>
      <a href="/">Catches</a>
      <a href="/charts">Charts</a>
    </nav>
{{BODY}}
  </main>
</body>
</html>
"#;

const INDEX_HTML: &str = r#"    <header>
      <h1>Catch Log</h1>
    </header>
    {{NOTICE}}
    <section>
      {{FORM}}
    </section>
    <section>
      <form id="search" method="get" action="/">
        <input id="search-input" type="search" name="q" value="{{KEYWORD}}" placeholder="Search catches" autocomplete="off" />
      </form>
      <p>{{MATCHES}} matching catches</p>
      <table id="catches">
        <thead>
          <tr>
            <th>Date</th><th>Time</th><th>Location</th><th>Species</th>
            <th>Length (in)</th><th>Weight (lbs)</th><th>Temperature</th><th>Bait</th><th></th>
          </tr>
        </thead>
        <tbody>
{{ROWS}}
        </tbody>
      </table>
      <form class="pager" method="get" action="/">
        <input type="hidden" name="q" value="{{KEYWORD}}" />
        <button type="submit" name="page" value="{{PREV_PAGE}}" {{PREV_DISABLED}}>Previous</button>
        <span id="page-info">Page {{PAGE}} of {{TOTAL_PAGES}}</span>
        <button type="submit" name="page" value="{{NEXT_PAGE}}" {{NEXT_DISABLED}}>Next</button>
      </form>
    </section>
    <script>
      const searchForm = document.getElementById('search');
      const searchInput = document.getElementById('search-input');
      let searchTimer = null;
      searchInput.addEventListener('input', () => {
        clearTimeout(searchTimer);
        searchTimer = setTimeout(() => searchForm.submit(), 300);
      });
    </script>"#;

const EDIT_HTML: &str = r#"    <header>
      <h1>Edit Catch</h1>
    </header>
    {{NOTICE}}
    <section>
      {{FORM}}
    </section>
    <p><a href="/">Cancel</a></p>
    <script>
      document.addEventListener('keydown', (e) => {
        if (e.key === 'Escape') window.location.href = '/';
      });
    </script>"#;

const CHARTS_HTML: &str = r#"    <header>
      <h1>Catch Charts</h1>
    </header>
    <section>
      <select id="chart-select">
{{OPTIONS}}
      </select>
    </section>
    <section class="chart-card">
      <p id="chart-status"></p>
      <canvas id="chart-canvas"></canvas>
    </section>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <script>
      const select = document.getElementById('chart-select');
      const statusEl = document.getElementById('chart-status');
      const canvas = document.getElementById('chart-canvas');
      const palette = [
        'rgba(54,162,235,0.6)',
        'rgba(255,99,132,0.6)',
        'rgba(255,206,86,0.6)',
        'rgba(75,192,192,0.6)',
        'rgba(153,102,255,0.6)',
        'rgba(255,159,64,0.6)'
      ];
      let chart = null;

      const chartConfig = (series) => {
        const horizontal = series.style === 'horizontal-bar';
        const type = horizontal ? 'bar' : series.style;
        const dataset = { label: series.title, data: series.values };
        if (type === 'pie') {
          dataset.backgroundColor = series.labels.map((_, i) => palette[i % palette.length]);
        } else if (type === 'line') {
          dataset.borderColor = 'rgba(75,192,192,1)';
          dataset.fill = false;
          dataset.tension = 0.2;
        } else {
          dataset.backgroundColor = palette[0];
        }
        const options = { responsive: true };
        if (horizontal) options.indexAxis = 'y';
        if (type !== 'pie') options.scales = { y: { beginAtZero: true } };
        return { type, data: { labels: series.labels, datasets: [dataset] }, options };
      };

      const renderChart = async (kind) => {
        statusEl.textContent = '';
        try {
          const res = await fetch(`/api/charts/${kind}`);
          if (!res.ok) throw new Error(await res.text());
          const series = await res.json();
          if (chart) chart.destroy();
          chart = null;
          if (!series.labels.length) {
            statusEl.textContent = 'No data yet';
            return;
          }
          chart = new Chart(canvas.getContext('2d'), chartConfig(series));
        } catch (err) {
          statusEl.textContent = `Failed to load chart: ${err.message}`;
        }
      };

      select.addEventListener('change', (e) => renderChart(e.target.value));
      renderChart(select.value);
    </script>"#;

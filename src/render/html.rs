use crate::render::ReportData;

/// Render a self-contained HTML report (data embedded as JSON).
///
/// The page is a plain template with a `__DATA__` placeholder; `format!()` is
/// avoided because the embedded JS uses `${...}` template literals.
pub fn render_html_report(data: &ReportData) -> anyhow::Result<String> {
    let json = serde_json::to_string(data)?; // embedded as JS object literal
    // Keep `</script>` inside string values from closing the script tag.
    let json = json.replace("</", "<\\/");

    const TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Darknet Graph</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; }
  header { padding: 12px 16px; border-bottom: 1px solid #ddd; }
  .container { display: flex; height: calc(100vh - 58px); }
  .sidebar { width: 360px; border-right: 1px solid #ddd; padding: 12px; overflow: auto; }
  .main { flex: 1; padding: 12px; overflow: auto; }

  .summary { display: flex; gap: 16px; flex-wrap: wrap; font-size: 14px; color: #333; }
  .pill { padding: 4px 8px; border: 1px solid #ddd; border-radius: 999px; background: #fafafa; }

  .layer { cursor: pointer; user-select: none; padding: 2px 4px; border-radius: 4px; }
  .layer:hover { background: #f3f3f3; }
  .layer.selected { background: #e9f2ff; border: 1px solid #cfe3ff; }
  .chain { margin-left: 20px; }
  .muted { color: #777; font-size: 12px; }
  .hidden-attr { color: #aaa; }

  table { border-collapse: collapse; width: 100%; margin-top: 8px; }
  th, td { border-bottom: 1px solid #eee; padding: 6px 8px; text-align: left; font-size: 14px; }
  th { position: sticky; top: 0; background: white; border-bottom: 1px solid #ddd; }
  code { font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace; font-size: 13px; }
</style>
</head>
<body>
<header>
  <div class="summary" id="summary"></div>
</header>

<div class="container">
  <div class="sidebar">
    <div style="display:flex; gap: 8px; margin-bottom: 8px;">
      <input id="search" placeholder="Search operator or index..." style="flex:1; padding: 6px 8px; border: 1px solid #ddd; border-radius: 6px;">
      <label class="muted"><input type="checkbox" id="showHidden"> hidden</label>
    </div>
    <div id="layers"></div>
  </div>

  <div class="main">
    <h2 id="title">Select a layer</h2>
    <div id="meta" class="muted"></div>
    <div id="details"></div>
  </div>
</div>

<script>
// Embedded report data (JSON object literal)
const DATA = __DATA__;

const state = {
  selected: null,
  search: "",
  showHidden: false
};

function escapeHtml(s) {
  return String(s)
    .replaceAll("&", "&amp;")
    .replaceAll("<", "&lt;")
    .replaceAll(">", "&gt;")
    .replaceAll('"', "&quot;")
    .replaceAll("'", "&#39;");
}

function renderSummary() {
  const t = DATA.totals;
  const el = document.getElementById("summary");
  el.innerHTML = `
    <span class="pill"><b>${escapeHtml(DATA.title)}</b> (${escapeHtml(DATA.format)})</span>
    <span class="pill">input: <code>${escapeHtml(DATA.input)}</code></span>
    <span class="pill">layers: <b>${t.layers}</b></span>
    <span class="pill">nodes: <b>${t.nodes}</b></span>
    <span class="pill">edges: <b>${t.edges}</b></span>
    <span class="pill">hidden attributes: <b>${t.hidden_attributes}</b></span>
  `;
}

function nodeMatches(node) {
  if (!state.search) return true;
  const s = state.search.toLowerCase();
  if (node.name.toLowerCase() === s) return true;
  if (node.operator.toLowerCase().includes(s)) return true;
  return node.chain.some(nodeMatches);
}

function renderLayers() {
  const root = document.getElementById("layers");
  root.innerHTML = "";

  DATA.nodes.forEach((node, index) => {
    if (!nodeMatches(node)) return;

    const row = document.createElement("div");
    row.className = "layer" + (state.selected === index ? " selected" : "");
    row.onclick = () => selectLayer(index);
    const chain = node.chain.map((c) => escapeHtml(c.operator)).join(" → ");
    row.innerHTML = `<code>${escapeHtml(node.name)}</code> ${escapeHtml(node.operator)}`
      + (chain ? ` <span class="muted">→ ${chain}</span>` : "");
    root.appendChild(row);
  });
}

function attributeRows(node) {
  return node.attributes
    .filter((a) => state.showHidden || a.visible)
    .map((a) => `
      <tr class="${a.visible ? "" : "hidden-attr"}">
        <td>${escapeHtml(a.name)}</td>
        <td><code>${escapeHtml(a.value)}</code></td>
      </tr>`)
    .join("");
}

function nodeSection(node, depth) {
  const rows = attributeRows(node);
  const category = node.category ? ` <span class="muted">[${escapeHtml(node.category)}]</span>` : "";
  const weights = node.initializers.length
    ? `<div class="muted">weights: ${node.initializers.map(escapeHtml).join(", ")}</div>`
    : "";
  const table = rows
    ? `<table><thead><tr><th>attribute</th><th>value</th></tr></thead><tbody>${rows}</tbody></table>`
    : "";
  const chain = node.chain.map((c) => nodeSection(c, depth + 1)).join("");
  return `<div class="${depth ? "chain" : ""}">
    <h${3 + Math.min(depth, 2)}>${escapeHtml(node.operator)}${category} <code class="muted">${escapeHtml(node.name)}</code></h${3 + Math.min(depth, 2)}>
    ${weights}${table}${chain}
  </div>`;
}

function selectLayer(index) {
  state.selected = index;
  const node = DATA.nodes[index];
  document.getElementById("title").textContent = `${node.name}: ${node.operator}`;
  document.getElementById("meta").textContent =
    `inputs: ${node.inputs.join(", ") || "-"} | outputs: ${node.outputs.join(", ") || "-"}`;
  document.getElementById("details").innerHTML = nodeSection(node, 0);
  renderLayers();
}

document.getElementById("search").addEventListener("input", (e) => {
  state.search = e.target.value || "";
  renderLayers();
});

document.getElementById("showHidden").addEventListener("change", (e) => {
  state.showHidden = e.target.checked;
  if (state.selected !== null) selectLayer(state.selected);
});

renderSummary();
renderLayers();
if (DATA.nodes.length) selectLayer(0);
</script>
</body>
</html>
"#;

    Ok(TEMPLATE.replace("__DATA__", &json))
}

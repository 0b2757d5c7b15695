//! Interactive HTML rendering
//!
//! The page embeds the payload as JSON and draws it with Plotly. Controls
//! filter edges by shared patients, shared revenue and specialty; clicking a
//! node lists its connections.

use crate::error::{NetworkError, Result};
use crate::export::payload::VisualizationPayload;

const TITLE_PLACEHOLDER: &str = "__TITLE__";
const PAYLOAD_PLACEHOLDER: &str = "__PAYLOAD__";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>__TITLE__</title>
    <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
    <style>
        body { font-family: Arial, sans-serif; margin: 0; padding: 20px; background-color: #f5f5f5; }
        .container { display: flex; gap: 20px; }
        .main-content { flex: 1; }
        .controls { width: 300px; background: white; padding: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); height: fit-content; }
        .control-group { margin-bottom: 20px; }
        .control-group label { display: block; margin-bottom: 5px; font-weight: bold; }
        .control-group input, .control-group select { width: 100%; padding: 8px; border: 1px solid #ddd; border-radius: 4px; }
        .privacy-notice { background: #e8f5e9; border: 1px solid #4caf50; padding: 15px; border-radius: 8px; margin-bottom: 20px; }
        .privacy-notice h3 { margin-top: 0; color: #2e7d32; }
        .stats { background: #f8f9fa; padding: 10px; border-radius: 4px; font-size: 12px; }
        #connectionTable { margin-top: 20px; max-height: 400px; overflow-y: auto; }
        table { width: 100%; border-collapse: collapse; font-size: 12px; }
        th, td { padding: 8px; text-align: left; border-bottom: 1px solid #ddd; }
        th { background-color: #f2f2f2; position: sticky; top: 0; }
        .high-revenue { background-color: #ffebee; }
        .medium-revenue { background-color: #fff3e0; }
        .low-revenue { background-color: #f3e5f5; }
    </style>
</head>
<body>
    <div class="privacy-notice">
        <h3>Synthetic Healthcare Data</h3>
        <p><strong>Privacy:</strong> every NPI, name and claim on this page is synthetic. No real provider identifiers, addresses or contact details are included.</p>
    </div>

    <div class="container">
        <div class="main-content">
            <div id="networkPlot" style="width:100%; height:600px;"></div>
        </div>

        <div class="controls">
            <div class="control-group">
                <label for="viewMode">View Mode:</label>
                <select id="viewMode" onchange="updateVisualization()">
                    <option value="shared">Shared Revenue Only</option>
                    <option value="total">Total Revenue</option>
                </select>
            </div>

            <div class="control-group">
                <label for="minSharedPatients">Min Shared Patients:</label>
                <input type="range" id="minSharedPatients" min="1" max="20" value="1" oninput="updateVisualization()">
                <span id="minSharedPatientsValue">1</span>
            </div>

            <div class="control-group">
                <label for="minSharedRevenue">Min Shared Revenue:</label>
                <input type="range" id="minSharedRevenue" min="0" max="50000" value="0" step="1000" oninput="updateVisualization()">
                <span id="minSharedRevenueValue">$0</span>
            </div>

            <div class="control-group">
                <label for="specialtyFilter">Provider Specialty:</label>
                <select id="specialtyFilter" onchange="updateVisualization()">
                    <option value="all">All Specialties</option>
                </select>
            </div>

            <div class="stats" id="networkStats"></div>

            <div id="connectionTable">
                <h4>Provider Connections</h4>
                <p>Click a provider node to see their connections</p>
            </div>
        </div>
    </div>

<script>
const payload = __PAYLOAD__;
const nodesData = payload.nodes;
const edgesData = payload.edges;
let currentNodes = nodesData.slice();
let currentEdges = edgesData.slice();

function money(value) {
    return '$' + value.toLocaleString(undefined, { minimumFractionDigits: 2, maximumFractionDigits: 2 });
}

function shorten(text, limit) {
    return text.length > limit ? text.substring(0, limit - 3) + '...' : text;
}

function escapeHtml(text) {
    const div = document.createElement('div');
    div.textContent = text;
    return div.innerHTML;
}

const specialtySelect = document.getElementById('specialtyFilter');
[...new Set(nodesData.map(n => n.specialty))].sort().forEach(spec => {
    const option = document.createElement('option');
    option.value = spec;
    option.textContent = spec;
    specialtySelect.appendChild(option);
});

function updateVisualization() {
    const minSharedPatients = parseInt(document.getElementById('minSharedPatients').value, 10);
    const minSharedRevenue = parseInt(document.getElementById('minSharedRevenue').value, 10);
    const specialty = specialtySelect.value;

    document.getElementById('minSharedPatientsValue').textContent = minSharedPatients;
    document.getElementById('minSharedRevenueValue').textContent = money(minSharedRevenue);

    currentEdges = edgesData.filter(edge =>
        edge.shared_patients >= minSharedPatients &&
        edge.shared_revenue >= minSharedRevenue &&
        (specialty === 'all' ||
         edge.provider1_specialty === specialty ||
         edge.provider2_specialty === specialty)
    );

    const connected = new Set();
    currentEdges.forEach(edge => {
        connected.add(edge.node1);
        connected.add(edge.node2);
    });

    currentNodes = nodesData.filter(node =>
        connected.has(node.id) && (specialty === 'all' || node.specialty === specialty)
    );

    createPlot();
    updateStats();
}

function edgeStyle(revenue) {
    if (revenue > 20000) return { color: '#d32f2f', width: 3 };
    if (revenue > 10000) return { color: '#f57c00', width: 2 };
    return { color: '#fbc02d', width: 1 };
}

function createPlot() {
    const shared = document.getElementById('viewMode').value === 'shared';
    const traces = currentEdges.map(edge => {
        const style = edgeStyle(edge.shared_revenue);
        return {
            x: [edge.x0, edge.x1],
            y: [edge.y0, edge.y1],
            mode: 'lines',
            line: style,
            hoverinfo: 'none',
            showlegend: false
        };
    });

    traces.push({
        x: currentNodes.map(n => n.x),
        y: currentNodes.map(n => n.y),
        mode: 'markers+text',
        marker: {
            size: currentNodes.map(n => shared ?
                Math.max(8, Math.min(30, n.shared_patients * 2)) :
                Math.max(8, Math.min(30, n.total_patients / 2))),
            color: currentNodes.map(n => shared ? n.shared_patients : n.total_patients),
            colorscale: shared ? 'Reds' : 'Blues',
            showscale: true,
            colorbar: { title: shared ? 'Shared Patients' : 'Total Patients', x: 1.02 },
            line: { width: 1, color: 'darkblue' }
        },
        text: currentNodes.map(n => shorten(n.label, 20)),
        textposition: 'middle center',
        textfont: { size: 10 },
        hoverinfo: 'text',
        hovertext: currentNodes.map(n =>
            `${escapeHtml(n.label)}<br>NPI: ${n.id}<br>Specialty: ${escapeHtml(n.specialty)}<br>` +
            (shared ?
                `Shared Patients: ${n.shared_patients}<br>Shared Revenue: ${money(n.shared_revenue)}<br>Shared Revenue %: ${n.shared_revenue_pct.toFixed(1)}%` :
                `Total Patients: ${n.total_patients}<br>Total Revenue: ${money(n.total_revenue)}`)),
        showlegend: false
    });

    const layout = {
        title: `${payload.title} - ${shared ? 'Shared' : 'Total'} Revenue`,
        showlegend: false,
        hovermode: 'closest',
        margin: { t: 50, b: 50, l: 50, r: 50 },
        xaxis: { showgrid: false, zeroline: false, showticklabels: false },
        yaxis: { showgrid: false, zeroline: false, showticklabels: false },
        plot_bgcolor: 'rgba(0,0,0,0)',
        paper_bgcolor: 'rgba(0,0,0,0)'
    };

    const plot = document.getElementById('networkPlot');
    Plotly.newPlot(plot, traces, layout);
    plot.on('plotly_click', data => {
        const point = data.points.find(p => p.curveNumber === traces.length - 1);
        if (point) {
            showConnections(currentNodes[point.pointIndex]);
        }
    });
}

function showConnections(node) {
    const visible = new Set(currentNodes.map(n => n.id));
    const connections = node.connections
        .filter(conn => visible.has(conn.neighbor))
        .sort((a, b) => b.shared_patients - a.shared_patients);

    let html = `
        <h4>${escapeHtml(node.label)}</h4>
        <p><strong>Specialty:</strong> ${escapeHtml(node.specialty)}</p>
        <p><strong>Shared Patients:</strong> ${node.shared_patients} | <strong>Shared Revenue:</strong> ${money(node.shared_revenue)}</p>
        <table>
            <thead>
                <tr><th>Connected Provider</th><th>Patients</th><th>Revenue</th><th>Avg/Patient</th></tr>
            </thead>
            <tbody>`;

    connections.forEach(conn => {
        const tier = conn.shared_revenue > 15000 ? 'high-revenue' :
                     conn.shared_revenue > 7500 ? 'medium-revenue' : 'low-revenue';
        html += `
                <tr class="${tier}">
                    <td title="${escapeHtml(conn.neighbor_label)}">${escapeHtml(shorten(conn.neighbor_label, 25))}</td>
                    <td>${conn.shared_patients}</td>
                    <td>${money(conn.shared_revenue)}</td>
                    <td>${money(conn.avg_revenue)}</td>
                </tr>`;
    });

    html += '</tbody></table>';
    document.getElementById('connectionTable').innerHTML = html;
}

function updateStats() {
    const totalRevenue = currentEdges.reduce((sum, edge) => sum + edge.shared_revenue, 0);
    const avgSharedPatients = currentEdges.length > 0 ?
        currentEdges.reduce((sum, edge) => sum + edge.shared_patients, 0) / currentEdges.length : 0;

    document.getElementById('networkStats').innerHTML = `
        <strong>Network Statistics:</strong><br>
        Providers: ${currentNodes.length} of ${payload.stats.provider_count}<br>
        Connections: ${currentEdges.length} of ${payload.stats.connection_count}<br>
        Total Shared Revenue: ${money(totalRevenue)}<br>
        Avg Shared Patients: ${avgSharedPatients.toFixed(1)}`;
}

updateVisualization();
</script>
</body>
</html>
"#;

/// Render the payload into a self-contained HTML page
///
/// The template is split at its markers once, so substituted text is never
/// scanned for markers again.
pub fn render_html(payload: &VisualizationPayload) -> Result<String> {
    let json = serde_json::to_string(payload)?;
    let (head, rest) = split_template(TEMPLATE, TITLE_PLACEHOLDER)?;
    let (middle, tail) = split_template(rest, PAYLOAD_PLACEHOLDER)?;

    let title = escape_html(&payload.title);
    let json = escape_script(&json);
    let mut html = String::with_capacity(TEMPLATE.len() + title.len() + json.len());
    html.push_str(head);
    html.push_str(&title);
    html.push_str(middle);
    html.push_str(&json);
    html.push_str(tail);
    Ok(html)
}

fn split_template<'a>(template: &'a str, marker: &str) -> Result<(&'a str, &'a str)> {
    template
        .split_once(marker)
        .ok_or_else(|| NetworkError::config(format!("HTML template has no {marker} marker")))
}

/// Escape text for use inside HTML element content
fn escape_html(text: &str) -> String {
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

/// Keep embedded JSON from closing the surrounding script element
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "<\\!--")
}

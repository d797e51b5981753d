//! Static page assets: stylesheet and client script

/// Dashboard stylesheet
pub const STYLES: &str = r#"
body { margin: 0; background-color: #f8f9fa; }
.dashboard-container { font-family: 'Inter', system-ui, sans-serif; padding: 20px; }
.header {
    text-align: center; margin-bottom: 30px; padding: 30px; color: white;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    border-radius: 12px; box-shadow: 0 4px 6px rgba(0,0,0,0.1);
}
.dashboard-title { margin: 0; font-size: 2.5em; font-weight: 600; }
.dashboard-subtitle { margin: 10px 0 0 0; font-size: 1.2em; opacity: 0.9; }
.metrics-container, .charts-row { display: flex; gap: 20px; margin-bottom: 30px; flex-wrap: wrap; }
.metric-card {
    flex: 1; min-width: 200px; border-radius: 12px; overflow: hidden;
    box-shadow: 0 4px 6px rgba(0,0,0,0.1); transition: transform 0.2s ease;
}
.metric-card:hover, .chart-container:hover { transform: translateY(-2px); }
.metric-content { padding: 25px; text-align: center; }
.revenue-card { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); }
.users-card { background: linear-gradient(135deg, #f093fb 0%, #f5576c 100%); }
.conversion-card { background: linear-gradient(135deg, #4facfe 0%, #00f2fe 100%); }
.growth-card { background: linear-gradient(135deg, #43e97b 0%, #38f9d7 100%); }
.metric-value { font-size: 2.2em; font-weight: 700; margin: 0; color: white; }
.metric-label {
    margin: 8px 0 0 0; color: rgba(255,255,255,0.9); font-weight: 500;
    text-transform: uppercase; letter-spacing: 0.5px;
}
.controls-container {
    background: white; padding: 25px; border-radius: 12px; margin-bottom: 30px;
    box-shadow: 0 4px 6px rgba(0,0,0,0.1);
    display: flex; gap: 30px; align-items: end; flex-wrap: wrap;
}
.control-group { flex: 1; min-width: 250px; }
.control-label {
    display: block; margin-bottom: 8px; font-weight: 600; color: #2c3e50;
    font-size: 0.9em; text-transform: uppercase; letter-spacing: 0.5px;
}
.date-picker input, .category-dropdown { font: inherit; padding: 6px; }
.category-dropdown { width: 100%; }
.chart-container {
    background: white; border-radius: 12px; padding: 25px;
    box-shadow: 0 4px 6px rgba(0,0,0,0.1); transition: transform 0.2s ease;
}
.chart-half { flex: 1; min-width: 450px; }
.chart-title {
    margin: 0 0 20px 0; color: #2c3e50; font-weight: 600; font-size: 1.3em;
    padding-bottom: 10px; border-bottom: 2px solid #ecf0f1;
}
.chart svg { width: 100%; height: auto; }
.chart-empty { fill: #7f8c8d; font-size: 16px; }
.axis-title, .tick { fill: #2c3e50; font-size: 11px; }
.legend { display: flex; gap: 12px; justify-content: flex-end; font-size: 0.85em; }
.legend-swatch { display: inline-block; width: 10px; height: 10px; border-radius: 2px; margin-right: 4px; }
.landing { font-family: 'Inter', system-ui, sans-serif; text-align: center; padding: 80px 20px; }
"#;

/// Client script
///
/// Sends the control values over the websocket (falling back to the JSON
/// route when the socket is not open) and draws the returned payload.
pub const SCRIPT: &str = r#"
(function () {
  const W = 600, H = 320, M = { l: 60, r: 20, t: 20, b: 70 };
  const svgNs = 'http://www.w3.org/2000/svg';
  const config = JSON.parse(document.getElementById('dashboard-config').textContent);
  const colors = Object.fromEntries(config.categories.map(c => [c.value, c.color]));
  const chart = document.getElementById(config.filteredChartId);
  let socket = null;

  function el(name, attrs, text) {
    const node = document.createElementNS(svgNs, name);
    for (const [k, v] of Object.entries(attrs)) node.setAttribute(k, v);
    if (text !== undefined) node.textContent = text;
    return node;
  }

  function controls() {
    const select = document.getElementById(config.categoryId);
    return {
      start_date: document.getElementById(config.dateRangeId + '-start').value || null,
      end_date: document.getElementById(config.dateRangeId + '-end').value || null,
      categories: Array.from(select.selectedOptions).map(o => o.value)
    };
  }

  function drawEmpty(message) {
    const svg = el('svg', { viewBox: `0 0 ${W} ${H}` });
    svg.appendChild(el('text', { x: W / 2, y: H / 2, 'text-anchor': 'middle', class: 'chart-empty' }, message));
    chart.replaceChildren(svg);
  }

  function drawSeries(buckets) {
    const weeks = [...new Set(buckets.map(b => b.week))];
    const cats = [...new Set(buckets.map(b => b.category))];
    const max = Math.max(...buckets.map(b => b.total));
    const pw = W - M.l - M.r, ph = H - M.t - M.b;
    const slot = pw / weeks.length, bar = slot * 0.8 / cats.length;
    const svg = el('svg', { viewBox: `0 0 ${W} ${H}` });

    svg.appendChild(el('line', { x1: M.l, y1: M.t + ph, x2: M.l + pw, y2: M.t + ph, stroke: '#2c3e50' }));
    svg.appendChild(el('line', { x1: M.l, y1: M.t, x2: M.l, y2: M.t + ph, stroke: '#2c3e50' }));

    for (const b of buckets) {
      const wi = weeks.indexOf(b.week), ci = cats.indexOf(b.category);
      const h = max > 0 ? b.total / max * ph : 0;
      const rect = el('rect', {
        x: M.l + wi * slot + slot * 0.1 + ci * bar, y: M.t + ph - h,
        width: bar, height: h, fill: colors[b.category] || '#999'
      });
      rect.appendChild(el('title', {}, `${b.week} ${b.category}: $${b.total.toFixed(2)}`));
      svg.appendChild(rect);
    }

    const every = Math.max(1, Math.ceil(weeks.length / 12));
    weeks.forEach((w, i) => {
      if (i % every !== 0) return;
      const x = M.l + (i + 0.5) * slot, y = M.t + ph + 12;
      svg.appendChild(el('text', { x, y, class: 'tick', transform: `rotate(45 ${x} ${y})` }, w));
    });
    svg.appendChild(el('text', { x: M.l - 8, y: M.t + 4, class: 'tick', 'text-anchor': 'end' }, max.toFixed(0)));
    svg.appendChild(el('text', { x: M.l + pw / 2, y: H - 4, class: 'axis-title', 'text-anchor': 'middle' }, 'Week'));
    svg.appendChild(el('text', { x: 14, y: M.t + ph / 2, class: 'axis-title', transform: `rotate(-90 14 ${M.t + ph / 2})`, 'text-anchor': 'middle' }, 'Sales ($)'));

    chart.replaceChildren(svg);
  }

  function draw(payload) {
    if (payload.kind === 'empty') drawEmpty(payload.message);
    else drawSeries(payload.buckets);
  }

  function update() {
    const body = controls();
    if (socket && socket.readyState === WebSocket.OPEN) {
      socket.send(JSON.stringify(Object.assign({ type: 'update' }, body)));
      return;
    }
    fetch(config.updateUrl, {
      method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(body)
    })
      .then(r => r.json())
      .then(r => r.payload ? draw(r.payload) : drawEmpty(r.error.message));
  }

  function connect() {
    const proto = location.protocol === 'https:' ? 'wss://' : 'ws://';
    socket = new WebSocket(proto + location.host + config.wsUrl);
    socket.onmessage = (event) => {
      const msg = JSON.parse(event.data);
      if (msg.type === 'chart') draw(msg.payload);
      else if (msg.type === 'error') drawEmpty(msg.message);
    };
    socket.onclose = () => { socket = null; setTimeout(connect, 2000); };
  }

  document.getElementById(config.dateRangeId + '-start').addEventListener('change', update);
  document.getElementById(config.dateRangeId + '-end').addEventListener('change', update);
  document.getElementById(config.categoryId).addEventListener('change', update);

  connect();
  update();
})();
"#;

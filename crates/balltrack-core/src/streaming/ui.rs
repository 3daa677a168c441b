use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

pub async fn index_page() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html")],
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>balltrack</title>
    <link href="https://fonts.googleapis.com/css2?family=Space+Mono:wght@400;700&display=swap" rel="stylesheet">
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            background: #fff;
            color: #000;
            font-family: 'Space Mono', monospace;
            height: 100vh;
            overflow: hidden;
        }
        .wrapper { height: 100vh; display: flex; flex-direction: column; }
        .header-bar {
            padding: 15px 20px;
            border-bottom: 2px solid #000;
            display: flex;
            justify-content: space-between;
            align-items: center;
        }
        .brand { font-weight: 700; font-size: 1.2rem; letter-spacing: -1px; }
        .main { flex: 1; display: grid; grid-template-columns: 300px 1fr; min-height: 0; }
        .sidebar {
            border-right: 2px solid #000;
            overflow-y: auto;
            padding: 20px;
            display: flex;
            flex-direction: column;
            gap: 24px;
        }
        .section-head {
            font-size: 0.7rem;
            font-weight: 700;
            text-transform: uppercase;
            letter-spacing: 1px;
            margin-bottom: 12px;
            padding-bottom: 6px;
            border-bottom: 1px solid #000;
        }
        .field-group {
            display: grid;
            grid-template-columns: 1fr 1fr;
            gap: 8px;
            margin-bottom: 8px;
        }
        .field { display: flex; flex-direction: column; }
        .field-label { font-size: 0.65rem; margin-bottom: 3px; text-transform: uppercase; }
        .field input, .field select {
            border: 1px solid #000;
            background: #fff;
            padding: 5px 7px;
            font-family: 'Space Mono', monospace;
            font-size: 0.8rem;
        }
        .save-btn {
            background: #000;
            color: #fff;
            border: none;
            padding: 12px;
            font-family: 'Space Mono', monospace;
            font-size: 0.75rem;
            font-weight: 700;
            text-transform: uppercase;
            cursor: pointer;
            letter-spacing: 1px;
        }
        .save-btn:active { background: #333; }
        .save-status { font-size: 0.7rem; text-align: center; min-height: 1em; }
        .content-area {
            display: grid;
            grid-template-columns: repeat(3, 1fr);
            grid-template-rows: repeat(2, 1fr);
            gap: 2px;
            background: #000;
            padding: 2px;
            min-height: 0;
        }
        .feed { background: #fff; position: relative; overflow: hidden; }
        .feed img { width: 100%; height: 100%; object-fit: contain; }
        .feed-title {
            position: absolute;
            top: 8px;
            left: 8px;
            font-size: 0.65rem;
            font-weight: 700;
            text-transform: uppercase;
            background: #fff;
            padding: 3px 7px;
            border: 1px solid #000;
        }
    </style>
</head>
<body>
<div class="wrapper">
    <div class="header-bar"><div class="brand">balltrack</div></div>
    <div class="main">
        <div class="sidebar">
            <div>
                <div class="section-head">Color range</div>
                <div class="field-group">
                    <div class="field"><span class="field-label">hue min</span><input id="hue_min" type="number" min="0" max="180"></div>
                    <div class="field"><span class="field-label">hue max</span><input id="hue_max" type="number" min="0" max="180"></div>
                    <div class="field"><span class="field-label">sat min</span><input id="sat_min" type="number" min="0" max="255"></div>
                    <div class="field"><span class="field-label">sat max</span><input id="sat_max" type="number" min="0" max="255"></div>
                    <div class="field"><span class="field-label">val min</span><input id="val_min" type="number" min="0" max="255"></div>
                    <div class="field"><span class="field-label">val max</span><input id="val_max" type="number" min="0" max="255"></div>
                </div>
            </div>
            <div>
                <div class="section-head">Detection</div>
                <div class="field-group">
                    <div class="field"><span class="field-label">min area</span><input id="min_area" type="number" min="0"></div>
                    <div class="field"><span class="field-label">votes</span><input id="vote_threshold" type="number" min="1"></div>
                    <div class="field"><span class="field-label">min radius</span><input id="min_radius" type="number" min="1"></div>
                    <div class="field"><span class="field-label">max radius</span><input id="max_radius" type="number" min="0"></div>
                    <div class="field"><span class="field-label">min dist</span><input id="min_center_dist" type="number" min="1"></div>
                    <div class="field"><span class="field-label">acc scale</span><input id="accumulator_scale" type="number" min="1"></div>
                </div>
            </div>
            <div>
                <div class="section-head">Depth</div>
                <div class="field-group">
                    <div class="field"><span class="field-label">model</span>
                        <select id="model">
                            <option value="tangent">tangent</option>
                            <option value="linear">linear</option>
                        </select>
                    </div>
                    <div class="field"><span class="field-label">offset x</span><input id="sample_offset_x" type="number"></div>
                    <div class="field"><span class="field-label">edge guard</span><input id="edge_guard_x" type="number" min="0"></div>
                </div>
            </div>
            <button class="save-btn" onclick="save()">Save</button>
            <div class="save-status" id="status"></div>
        </div>
        <div class="content-area">
            <div class="feed"><span class="feed-title">color</span><img src="/stream/color" alt="color"></div>
            <div class="feed"><span class="feed-title">hue</span><img src="/stream/hue" alt="hue"></div>
            <div class="feed"><span class="feed-title">sat</span><img src="/stream/sat" alt="sat"></div>
            <div class="feed"><span class="feed-title">val</span><img src="/stream/val" alt="val"></div>
            <div class="feed"><span class="feed-title">closing</span><img src="/stream/closing" alt="closing"></div>
            <div class="feed"><span class="feed-title">depth</span><img src="/stream/depth" alt="depth"></div>
        </div>
    </div>
</div>
<script>
    const num = id => Number(document.getElementById(id).value);
    const set = (id, v) => { document.getElementById(id).value = v; };

    async function load() {
        const res = await fetch('/config');
        const tuning = await res.json();
        const c = tuning.detection.color;
        for (const k of ['hue_min','hue_max','sat_min','sat_max','val_min','val_max']) set(k, c[k]);
        set('min_area', tuning.detection.min_area);
        const h = tuning.detection.hough;
        for (const k of ['vote_threshold','min_radius','max_radius','min_center_dist','accumulator_scale']) set(k, h[k]);
        set('sample_offset_x', tuning.depth.sample_offset_x);
        set('edge_guard_x', tuning.depth.edge_guard_x);
        document.getElementById('model').value = tuning.depth.model;
    }

    async function save() {
        const tuning = {
            detection: {
                color: {
                    hue_min: num('hue_min'), hue_max: num('hue_max'),
                    sat_min: num('sat_min'), sat_max: num('sat_max'),
                    val_min: num('val_min'), val_max: num('val_max'),
                },
                min_area: num('min_area'),
                hough: {
                    accumulator_scale: num('accumulator_scale'),
                    min_center_dist: num('min_center_dist'),
                    vote_threshold: num('vote_threshold'),
                    min_radius: num('min_radius'),
                    max_radius: num('max_radius'),
                },
            },
            depth: {
                model: document.getElementById('model').value,
                sample_offset_x: num('sample_offset_x'),
                edge_guard_x: num('edge_guard_x'),
            },
        };
        const res = await fetch('/config', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify(tuning),
        });
        document.getElementById('status').textContent = res.ok ? 'saved' : 'save failed';
    }

    load();
</script>
</body>
</html>"#,
    )
}

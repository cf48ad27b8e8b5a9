//! Preview document rendering
//!
//! Produces one self-contained HTML page per request. React and Sandpack load from esm.sh via an
//! import map; the component and its local imports are embedded as a JSON file map. The page
//! subscribes to `/__reload` and reloads itself when the server broadcasts `reload`.

use std::collections::BTreeMap;

use serde_json::json;

use crate::domain::ComponentAnalysis;

const REACT_VERSION: &str = "18.3.1";

/// Render the preview document for `analysis`. Pure: same input, same output.
pub fn render(analysis: &ComponentAnalysis) -> String {
    let name = &analysis.component_name;
    let files = embed_json(&json!(sandpack_files(analysis)));
    let dependencies = embed_json(&json!(custom_dependencies(analysis)));
    let title = crate::server::pages::escape_html(&name.to_uppercase());
    let label = embed_json(&json!(name.to_uppercase()));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>ARTIFACT // {title}</title>
  <script type="importmap">
  {{
    "imports": {{
      "react": "https://esm.sh/react@{REACT_VERSION}",
      "react/": "https://esm.sh/react@{REACT_VERSION}/",
      "react-dom": "https://esm.sh/react-dom@{REACT_VERSION}?external=react",
      "react-dom/": "https://esm.sh/react-dom@{REACT_VERSION}&external=react/",
      "@codesandbox/sandpack-react": "https://esm.sh/@codesandbox/sandpack-react@2?external=react,react-dom"
    }}
  }}
  </script>
  <style>
    :root {{ --bg: #09090b; --surface: rgba(24, 24, 27, 0.5); --text: #fafafa; --muted: #71717a; --subtle: #27272a; --ok: #34d399; }}
    * {{ box-sizing: border-box; margin: 0; padding: 0; }}
    html, body, #root {{ height: 100%; overflow: hidden; }}
    body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: var(--bg); color: var(--text); }}
    .app {{ height: 100vh; display: flex; flex-direction: column; }}
    .header {{ height: 48px; padding: 0 1rem; display: flex; align-items: center; justify-content: space-between; background: var(--surface); border-bottom: 2px solid rgba(250, 250, 250, 0.1); }}
    .status {{ width: 6px; height: 6px; background: var(--ok); display: inline-block; margin-right: 0.75rem; }}
    .name {{ font-size: 12px; font-weight: 700; letter-spacing: 0.05em; }}
    .tab {{ padding: 8px 16px; background: transparent; border: none; border-bottom: 2px solid transparent; color: var(--muted); font-size: 10px; font-weight: 700; cursor: pointer; }}
    .tab.active {{ color: var(--text); background: var(--subtle); border-bottom-color: var(--text); }}
    .content {{ flex: 1; position: relative; overflow: hidden; }}
    .panel {{ position: absolute; inset: 0; display: none; }}
    .panel.active {{ display: flex; flex-direction: column; }}
    .preview {{ background: #ffffff; }}
    .loading {{ height: 100%; display: flex; align-items: center; justify-content: center; color: var(--muted); font-size: 10px; letter-spacing: 0.1em; }}
    .sp-wrapper, .sp-layout, .sp-stack, .sp-code-editor, .sp-preview-container, .sp-preview-iframe {{ height: 100% !important; }}
  </style>
</head>
<body>
  <div id="root"><div class="loading">INITIALIZING SANDPACK</div></div>
  <script type="module">
    import React, {{ useState }} from 'react';
    import {{ createRoot }} from 'react-dom/client';
    import {{ SandpackProvider, SandpackCodeEditor, SandpackPreview }} from '@codesandbox/sandpack-react';

    const files = {files};
    const customSetup = {{ dependencies: {dependencies} }};
    const h = React.createElement;

    function App() {{
      const [tab, setTab] = useState('preview');
      const tabButton = (id, label) => h('button', {{ className: 'tab' + (tab === id ? ' active' : ''), onClick: () => setTab(id) }}, label);
      return h(SandpackProvider, {{ files, customSetup, template: 'react-ts', theme: 'dark' }},
        h('div', {{ className: 'app' }},
          h('div', {{ className: 'header' }},
            h('div', null, h('span', {{ className: 'status' }}), h('span', {{ className: 'name' }}, {label})),
            h('div', null, tabButton('code', 'CODE'), tabButton('preview', 'PREVIEW'))
          ),
          h('div', {{ className: 'content' }},
            h('div', {{ className: 'panel' + (tab === 'code' ? ' active' : '') }},
              h(SandpackCodeEditor, {{ showTabs: true, showLineNumbers: true, style: {{ height: '100%' }} }})),
            h('div', {{ className: 'panel preview' + (tab === 'preview' ? ' active' : '') }},
              h(SandpackPreview, {{ showOpenInCodeSandbox: false, showRefreshButton: true, style: {{ height: '100%' }} }}))
          )
        )
      );
    }}

    createRoot(document.getElementById('root')).render(h(App));

    const events = new EventSource('/__reload');
    events.onmessage = (event) => {{
      if (event.data === 'reload') {{
        window.location.reload();
      }}
    }};
  </script>
</body>
</html>
"#
    )
}

/// Sandpack file map: an `/App.tsx` wrapper, the component itself, and each local import at
/// its specifier path
fn sandpack_files(analysis: &ComponentAnalysis) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    files.insert("/App.tsx".to_string(), app_wrapper(&analysis.component_name));
    files.insert("/Component.tsx".to_string(), analysis.source_text.clone());

    for import in &analysis.local_imports {
        let path = import
            .import_path
            .strip_prefix('.')
            .unwrap_or(&import.import_path);
        let path = if path.contains('.') {
            path.to_string()
        } else {
            format!("{path}.tsx")
        };
        files.insert(path, import.source_text.clone());
    }

    files
}

fn app_wrapper(component_name: &str) -> String {
    format!(
        "import React from 'react';\n\
         import {component_name} from './Component';\n\n\
         export default function App() {{\n  return (\n    <div>\n      <{component_name} />\n    </div>\n  );\n}}\n"
    )
}

/// Dependencies Sandpack does not already provide, pinned to `latest`
fn custom_dependencies(analysis: &ComponentAnalysis) -> BTreeMap<&str, &str> {
    analysis
        .dependencies
        .iter()
        .map(String::as_str)
        .filter(|dep| *dep != "react" && *dep != "react-dom")
        .map(|dep| (dep, "latest"))
        .collect()
}

/// JSON suitable for inlining into a `<script>` element
fn embed_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

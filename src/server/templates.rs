//! Embedded HTML templates.

/// Homepage template.
pub const INDEX: &str = r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Plinth</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <main class="container">
        <header>
            <div class="brand">
                <div class="brand-icon"></div>
                <span>Plinth</span>
            </div>
            <span class="status-badge">running</span>
        </header>
        <section class="hero">
            <h1>Hello, Plinth!</h1>
            <p>
                A minimal service scaffold with layered configuration,
                structured logging, and a health endpoint already wired up.
            </p>
        </section>
        <section class="links">
            <ul>
                <li><code>GET /</code> &mdash; this page</li>
                <li><code>GET /api/health</code> &mdash; JSON health check</li>
                <li><code>GET /metrics</code> &mdash; Prometheus metrics</li>
            </ul>
        </section>
    </main>
</body>
</html>
"#;

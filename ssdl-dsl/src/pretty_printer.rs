//! Canonical source rendering
//!
//! Renders a document tree back to SSDL text in one canonical shape: sections
//! in declaration order, four-space indentation, one field per line, no
//! separator commas except inside inline sequences. Printing is total and the
//! output reparses to an equal tree; [`round_trip`] is the normalization
//! entry point built on that guarantee.

use crate::error::ParseError;
use crate::parse;
use ssdl_core::{
    Application, Deployment, DeploymentEnv, Mapping, Query, Sensor, Service, Ssdl, Value,
    Visualization,
};

const INDENT: &str = "    ";

/// Render a document in canonical form.
pub fn pretty_print(doc: &Ssdl) -> String {
    let mut p = Printer::new();
    p.service(&doc.service);
    p.data(&doc.data.sensors);
    p.application(&doc.application);
    p.deployment(&doc.deployment);
    p.out
}

/// Parse `source` and render it back in canonical form.
pub fn round_trip(source: &str) -> Result<String, ParseError> {
    Ok(pretty_print(&parse(source)?))
}

struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn new() -> Self {
        Printer {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn open(&mut self, head: &str) {
        self.line(&format!("{} {{", head));
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth -= 1;
        self.line("}");
    }

    fn service(&mut self, service: &Service) {
        self.open(".service");
        self.line(&format!("name: {}", quote(&service.name)));
        self.line(&format!(
            "version: {} {} {}",
            service.version.major, service.version.minor, service.version.patch
        ));
        self.line(&format!("scope: {}", service.scope));
        self.close();
    }

    fn data(&mut self, sensors: &Mapping<Sensor>) {
        self.open(".data");
        for (key, sensor) in sensors.iter() {
            self.open(&format!("{}:", key));
            self.line(&format!("type: {}", sensor.sensor_type));
            self.line(&format!("provider: {}", sensor.provider));
            self.line(&format!("uri: {}", quote(sensor.uri.as_str())));
            self.open("format:");
            for (field, value) in sensor.format.props.iter() {
                self.line(&format!("{}: {}", field, fmt_value(value)));
            }
            self.close();
            if let Some(query) = &sensor.query {
                self.query(query);
            }
            self.close();
        }
        self.close();
    }

    fn query(&mut self, query: &Query) {
        self.open("query:");
        self.line(&format!("entity: {}", quote(&query.entity)));
        let select: Vec<String> = query.select.iter().map(|s| quote(s)).collect();
        self.line(&format!("select: [{}]", select.join(", ")));
        self.close();
    }

    fn application(&mut self, app: &Application) {
        self.open(".application");
        self.line(&format!("type: {}", app.app_type));
        self.line(&format!("layout: {}", app.layout));
        if !app.roles.is_empty() {
            let roles: Vec<String> = app.roles.iter().map(|r| r.to_string()).collect();
            self.line(&format!("roles: [{}]", roles.join(", ")));
        }
        self.open("graphs:");
        for (key, graph) in app.graphs.iter() {
            self.visualization(key, graph);
        }
        self.close();
        self.close();
    }

    fn visualization(&mut self, key: &str, vis: &Visualization) {
        self.open(&format!("{}:", key));
        self.line(&format!("type: {}", vis.vis_type));
        self.open("format:");
        for (field, ty) in vis.format.iter() {
            self.line(&format!("{}: {}", field, ty));
        }
        self.close();
        self.close();
    }

    fn deployment(&mut self, deployment: &Deployment) {
        self.open(".deployment");
        for (key, env) in deployment.envs.iter() {
            self.environment(key, env);
        }
        self.close();
    }

    fn environment(&mut self, key: &str, env: &DeploymentEnv) {
        self.open(&format!("{}:", key));
        self.line(&format!("uri: {}", quote(env.uri.as_str())));
        if let Some(port) = env.port {
            self.line(&format!("port: {}", port));
        }
        self.line(&format!("type: {}", env.deploy_type));
        if let Some(credentials) = &env.credentials {
            self.open("credentials:");
            for (field, value) in credentials.iter() {
                self.line(&format!("{}: {}", field, quote(value)));
            }
            self.close();
        }
        self.close();
    }
}

fn fmt_value(value: &Value) -> String {
    match value {
        Value::Str(s) => quote(s),
        Value::Integer(n) => n.to_string(),
        Value::Double(d) => fmt_double(*d),
        Value::Boolean(b) => b.to_string(),
        Value::Timestamp(t) => t.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        Value::Geolocation(g) => g.to_string(),
    }
}

/// Render a double so it reparses as a double: a value with no fractional
/// part gets an explicit `.0`, otherwise the shortest exact rendering is
/// already unambiguous.
fn fmt_double(d: f64) -> String {
    let s = format!("{}", d);
    if s.contains('.') {
        s
    } else {
        format!("{}.0", s)
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
        .service { name: "Flood Watch \"North\"", version: 2 1 0, scope: Water }
        .data {
            gauge: {
                type: SmartMeter, provider: Dataskop,
                uri: "https://data.example.org/gauges",
                format: {
                    level: 1.5, site: "weir", active: true,
                    at: 2024-03-01T06:30:00, pos: +48.210033+16.363449/
                }
            }
        }
        .application {
            type: MobileApp, layout: MultiPage, roles: [SuperUser],
            graphs: {
                levels: { type: Chart, format: { x: Double, y: Double } }
            }
        }
        .deployment {
            edge: { uri: "http://edge.example:8080/", type: Kubernetes }
        }
    "#;

    #[test]
    fn test_output_reparses_to_equal_tree() {
        let doc = parse(SOURCE).unwrap();
        let printed = pretty_print(&doc);
        let reparsed = parse(&printed).unwrap_or_else(|e| panic!("reparse failed: {}\n{}", e, printed));
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_printing_is_idempotent() {
        let first = round_trip(SOURCE).unwrap();
        let second = round_trip(&first).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sections_in_canonical_order() {
        let shuffled = r#"
            .deployment { e: { uri: "http://h.example", type: Docker } }
            .service { name: "s", version: 1 0 0, scope: Energy }
            .application { type: WebApp, layout: SinglePage, graphs: {} }
            .data {}
        "#;
        let printed = round_trip(shuffled).unwrap();
        let service = printed.find(".service").unwrap();
        let data = printed.find(".data").unwrap();
        let application = printed.find(".application").unwrap();
        let deployment = printed.find(".deployment").unwrap();
        assert!(service < data && data < application && application < deployment);
    }

    #[test]
    fn test_whole_double_keeps_decimal_point() {
        assert_eq!(fmt_double(45.0), "45.0");
        assert_eq!(fmt_double(270.95), "270.95");
        assert_eq!(fmt_double(-3.0), "-3.0");
    }

    #[test]
    fn test_overflowing_double_never_reaches_the_printer() {
        // An accepted tree must always print to reparseable text, so a
        // double that would render as `inf` has to be refused at parse time.
        let source = r#"
            .service { name: "s", version: 1 0 0, scope: Energy }
            .data {
                s: {
                    type: Device, provider: Fiware, uri: "http://h.example",
                    format: { big: 1e400 }
                }
            }
            .application { type: WebApp, layout: SinglePage, graphs: {} }
            .deployment {}
        "#;
        assert!(round_trip(source).is_err());
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("a\"b\\c\nd"), "\"a\\\"b\\\\c\\nd\"");
    }

    #[test]
    fn test_empty_roles_not_printed() {
        let source = r#"
            .service { name: "s", version: 1 0 0, scope: Energy }
            .data {}
            .application { type: WebApp, layout: SinglePage, graphs: {} }
            .deployment {}
        "#;
        let printed = round_trip(source).unwrap();
        assert!(!printed.contains("roles"));
    }
}

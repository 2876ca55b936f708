//! # fluentgen Bench
//!
//! Descriptor fixtures for generation benchmarks.

use std::fmt::Write;

const RETURN_TYPES: [&str; 6] = ["void", "int", "String", "String[]", "long[]", "List<String>"];

/// Builds a descriptor document with `units` public classes of `methods`
/// methods each.
///
/// Every unit extends the previous one, so the declaration index resolves
/// supertype counterparts across the document.
#[must_use]
pub fn sample_descriptor(units: usize, methods: usize) -> String {
    let mut xml = String::from("<sources>\n");
    for unit in 0..units {
        let _ = writeln!(xml, "  <sourceUnit package=\"org.example.bench\">");
        let _ = writeln!(xml, "    <import name=\"java.util.List\"/>");
        let _ = writeln!(xml, "    <class name=\"Widget{}\">", unit);
        if unit > 0 {
            let _ = writeln!(xml, "      <extends type=\"Widget{}\"/>", unit - 1);
        }
        for method in 0..methods {
            let returns = RETURN_TYPES[method % RETURN_TYPES.len()]
                .replace('<', "&lt;")
                .replace('>', "&gt;");
            let _ = writeln!(
                xml,
                "      <method name=\"op{}\" visibility=\"public\" returns=\"{}\">",
                method, returns
            );
            let _ = writeln!(xml, "        <parameter name=\"value\" type=\"int\"/>");
            let _ = writeln!(xml, "      </method>");
        }
        let _ = writeln!(xml, "    </class>");
        let _ = writeln!(xml, "  </sourceUnit>");
    }
    xml.push_str("</sources>\n");
    xml
}

//! GPX file generation from coordinate sequences.
//!
//! Generates valid GPX 1.1 XML for exercising the trail import endpoint.

use trails::models::CoordinatesWithAltitude;

/// Generates a GPX 1.1 XML document from a coordinate sequence.
///
/// Every point carries lat, lon, and an elevation tag — the import path
/// rejects elevation-less points, so fixtures always include them.
pub fn generate_gpx(points: &[CoordinatesWithAltitude], trail_name: &str) -> Vec<u8> {
    let mut gpx = String::new();

    // GPX 1.1 header
    gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    gpx.push('\n');
    gpx.push_str(r#"<gpx version="1.1" creator="trail-atlas-test-data""#);
    gpx.push_str(r#" xmlns="http://www.topografix.com/GPX/1/1""#);
    gpx.push_str(r#" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#);
    gpx.push_str(r#" xsi:schemaLocation="http://www.topografix.com/GPX/1/1 http://www.topografix.com/GPX/1/1/gpx.xsd">"#);
    gpx.push('\n');

    gpx.push_str("  <metadata>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(trail_name)));
    gpx.push_str("  </metadata>\n");

    gpx.push_str("  <trk>\n");
    gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(trail_name)));
    gpx.push_str("    <trkseg>\n");

    for point in points {
        gpx.push_str(&format!(
            r#"      <trkpt lat="{:.7}" lon="{:.7}">"#,
            point.latitude, point.longitude
        ));
        gpx.push('\n');
        gpx.push_str(&format!("        <ele>{:.2}</ele>\n", point.altitude));
        gpx.push_str("      </trkpt>\n");
    }

    gpx.push_str("    </trkseg>\n");
    gpx.push_str("  </trk>\n");
    gpx.push_str("</gpx>\n");

    gpx.into_bytes()
}

/// Escapes XML special characters in a string.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_gpx_basic() {
        let points = vec![
            CoordinatesWithAltitude::new(-105.2705, 40.0150, 1650.0).unwrap(),
            CoordinatesWithAltitude::new(-105.2695, 40.0160, 1660.0).unwrap(),
        ];

        let gpx = generate_gpx(&points, "Test Trail");
        let gpx_str = String::from_utf8(gpx).unwrap();

        assert!(gpx_str.contains(r#"version="1.1""#));
        assert!(gpx_str.contains("<name>Test Trail</name>"));
        assert!(gpx_str.contains(r#"lat="40.0150000""#));
        assert!(gpx_str.contains(r#"lon="-105.2705000""#));
        assert!(gpx_str.contains("<ele>1650.00</ele>"));
    }

    #[test]
    fn test_generate_gpx_escapes_special_chars() {
        let points = vec![CoordinatesWithAltitude::new(-105.0, 40.0, 1500.0).unwrap()];

        let gpx = generate_gpx(&points, "Test & <Trail> \"Name\"");
        let gpx_str = String::from_utf8(gpx).unwrap();

        assert!(gpx_str.contains("Test &amp; &lt;Trail&gt; &quot;Name&quot;"));
    }

    #[test]
    fn test_generated_gpx_round_trips_through_import() {
        let points = vec![
            CoordinatesWithAltitude::new(10.000, 44.000, 100.0).unwrap(),
            CoordinatesWithAltitude::new(10.001, 44.000, 150.0).unwrap(),
            CoordinatesWithAltitude::new(10.002, 44.000, 120.0).unwrap(),
        ];
        let gpx = generate_gpx(&points, "Round Trip");

        let parsed =
            trails::gpx_import::parse_trail_coordinates(&bytes::Bytes::from(gpx)).unwrap();
        assert_eq!(parsed.len(), points.len());
        for (parsed_point, point) in parsed.iter().zip(points.iter()) {
            assert!((parsed_point.longitude - point.longitude).abs() < 1e-7);
            assert!((parsed_point.latitude - point.latitude).abs() < 1e-7);
            assert!((parsed_point.altitude - point.altitude).abs() < 0.01);
        }
    }
}

//! Test utilities and report fixtures for report parser testing
//!
//! Fixtures are trimmed copies of the report layouts the parser handles:
//! the compact `NODE` / `Q= TC=` listing, verbose San Bernardino and
//! Riverside rational method reports, and a unit hydrograph report.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::assembler::RecordAssembler;
use super::classifier::classify;
use super::field_extractor::extract;
use crate::app::models::RawLine;


/// Compact listing with a duplicated node pair row
pub const COMPACT_REPORT: &str = r#"San Bernardino County Rational Hydrology Program
NODE 101-102
Q= 4.26  TC= 17.00

NODE 102-102
Q= 5.10  TC= 18.20
Q= 5.10  TC= 18.20
NODE 102-103
Q= 6.00  TC= 19.35
"#;

/// Verbose San Bernardino report: initial area, pipeflow and a main confluence
pub const SAN_BERNARDINO_REPORT: &str = r#"
          San Bernardino County Rational Hydrology Program
          (Hydrology Manual Date - August 1986)

          CIVILCADD/CIVILDESIGN Engineering Software
          Rational Hydrology Study     Date: 03/14/24

++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
Process from Point/Station      101.000 to Point/Station      102.000
**** INITIAL AREA EVALUATION ****

Initial area flow distance =    500.000(Ft.)
Top (of initial area) elevation =   1200.000(Ft.)
TC = k(0.525)*[(length^3)/(elevation change)]^0.2
Initial area time of concentration =   17.553 min.
Rainfall intensity =      2.345(In/Hr) for a  100.0 year storm
Subarea runoff =      3.141(CFS)
Total initial stream area =      1.500(Ac.)
++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
Process from Point/Station      102.000 to Point/Station      103.000
**** PIPEFLOW TRAVEL TIME (Program estimated size) ****

Upstream point/station elevation =   1190.000(Ft.)
Downstream point/station elevation =   1180.000(Ft.)
Pipe length =    300.00(Ft.)   Manning's N = 0.013
Travel time through pipe =    0.45 min.
Time of concentration (TC) =   18.00 min.
Subarea runoff =      2.000(CFS) for      1.000(Ac.)
Total runoff =      5.141(CFS) Total area =      2.500(Ac.)
++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
Process from Point/Station      103.000 to Point/Station      103.000
**** CONFLUENCE OF MAIN STREAMS ****

The following data inside Main Stream is listed:
In Main Stream number: 1
Stream flow area =      2.500(Ac.)
Runoff from this stream =      5.141(CFS)
Time of concentration =   18.00 min.
Summary of stream data:

Stream  Flow rate    TC        Rainfall Intensity
No.     (CFS)       (min)        (In/Hr)
1       5.141       18.00        2.201
Total of 2 main streams to confluence:
Results of confluence:
Total flow rate =      8.250(CFS)
Time of concentration =   18.50 min.
Effective stream area after confluence =      4.000(Ac.)
End of computations, total study area =      4.00 (Ac.)
"#;

/// Verbose Riverside report: initial area and a minor confluence
pub const RIVERSIDE_REPORT: &str = r#"
          Riverside County Rational Hydrology Program

          CIVILCADD/CIVILDESIGN Engineering Software
          Rational Hydrology Study     Date: 03/14/24

++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
Process from Point/Station       10.000 to Point/Station       20.000
**** INITIAL AREA EVALUATION ****

Initial area time of concentration =   12.500 min.
Initial area runoff =      2.750(CFS)
Total initial stream area =      1.100(Ac.)
++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
Process from Point/Station       20.000 to Point/Station       20.000
**** CONFLUENCE OF MINOR STREAMS ****

Along Main Stream number: 1 in normal stream number 1
Stream flow area =      1.100(Ac.)
Runoff from this stream =      2.750(CFS)
Time of concentration =   12.50 min.
Confluence information:
Effective stream flow =      4.100(CFS)
Time of concentration =   13.10 min.
Effective stream area after confluence =      2.000(Ac.)
"#;

/// Unit hydrograph report with summary lines and a runoff table
pub const UNIT_HYDROGRAPH_REPORT: &str = r#"
      U n i t   H y d r o g r a p h   A n a l y s i s
  San Bernardino County Synthetic Unit Hydrology Method
  Manual date - August 1986

Area averaged rainfall intensity isohyetal data:
Watershed area =   43.00(Ac.)
Peak flow rate in flood hydrograph =     26.18(CFS)
Flood volume = Effective rainfall    1.44(In) times area   43.0(Ac.)/[(In)/(Ft.)] =      5.15(Ac.Ft)

++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++++
                R u n o f f      H y d r o g r a p h
                ----------------------------------------------
                   Hydrograph in  5 Minute intervals ((CFS))
 ----------------------------------------------------------------------
 Time(h+m) Volume Ac.Ft    Q(CFS)  0         7.5        15.0
 ----------------------------------------------------------------------
   0+ 5       0.0021       0.30  Q    |          |
   0+10       0.0107       1.25  Q    |          |
   0+15       0.1500      12.40  |    V   Q      |
   0+20       0.4000       8.10  |    Q     V    |
 ----------------------------------------------------------------------
"#;

/// Unit hydrograph report carrying only the runoff table
pub const TABLE_ONLY_REPORT: &str = r#"
  San Bernardino County Synthetic Unit Hydrology Method
                R u n o f f      H y d r o g r a p h
 ----------------------------------------------------------------------
 Time(h+m) Volume Ac.Ft    Q(CFS)  0         7.5        15.0
 ----------------------------------------------------------------------
   0+ 5       0.0021       0.30  Q    |          |
   0+10       0.0107       1.25  Q    |          |
   0+15       0.1500      12.40  |    V   Q      |
   0+20       0.4000       8.10  |    Q     V    |
 ----------------------------------------------------------------------
  1+ 0       9.9999      99.99  values after the table are not read
"#;

/// Helper to create a temporary report file with given content
pub fn create_temp_report(content: &str) -> NamedTempFile {
    let mut temp_file = tempfile::Builder::new()
        .suffix(".out")
        .tempfile()
        .unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

/// Drive lines through classification, extraction and assembly
pub fn feed_lines(assembler: &mut RecordAssembler<'_>, path: &Path, lines: &[&str]) {
    for (index, text) in lines.iter().enumerate() {
        let line = RawLine::new(path, index + 1, text);
        let kind = classify(&line, assembler.state());
        let extracted = extract(&line, kind, assembler.state());
        assembler.accept(&line, kind, extracted);
    }
}

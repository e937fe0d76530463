use crate::engine::{Configuration, Disk, PEG_COUNT};
use crate::error::{Error, Result};

/// Parses a textual peg layout into a `Configuration`.
///
/// The input holds exactly three segments separated by `|`, one per peg in
/// order `A`, `B`, `C`. Each segment lists that peg's disks bottom to top,
/// separated by whitespace or commas. Empty segments denote empty pegs.
///
/// # Arguments
/// * `s`: The layout, for example `"3 2 1 | | "` for three disks on peg `A`.
///
/// # Returns
/// * `Ok(Configuration)` if the text parses and the layout is a legal puzzle
///   position (see [`Configuration::from_pegs`]).
/// * `Err(Error::InvalidConfiguration)` if:
///     - the number of `|`-separated segments is not three,
///     - a token is not a positive integer,
///     - the disks break the stacking rule or do not form `1..=N`.
/// * `Err(Error::InvalidDiskCount)` if no disks are listed.
///
/// # Examples
/// ```
/// use hanoi_solver::engine::Peg;
/// use hanoi_solver::utils::configuration_from_str;
///
/// let conf = configuration_from_str("3 | 2,1 |").unwrap();
/// assert_eq!(conf.peg(Peg::A), &[3]);
/// assert_eq!(conf.peg(Peg::B), &[2, 1]);
/// assert!(conf.peg(Peg::C).is_empty());
///
/// assert!(configuration_from_str("1 2 | |").is_err());
/// assert!(configuration_from_str("3 2 1").is_err());
/// ```
pub fn configuration_from_str(s: &str) -> Result<Configuration> {
    let segments: Vec<&str> = s.split('|').collect();
    if segments.len() != PEG_COUNT {
        return Err(Error::invalid_configuration(format!(
            "expected {} '|'-separated pegs, found {}",
            PEG_COUNT,
            segments.len()
        )));
    }

    let mut pegs: [Vec<Disk>; PEG_COUNT] = Default::default();
    for (peg, segment) in pegs.iter_mut().zip(segments) {
        for token in segment
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let disk = token.parse::<Disk>().map_err(|_| {
                Error::invalid_configuration(format!("unrecognized disk '{token}'"))
            })?;
            peg.push(disk);
        }
    }
    Configuration::from_pegs(pegs)
}

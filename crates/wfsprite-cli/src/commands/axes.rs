use anyhow::Result;
use wfsprite::core::axes::AXES;

pub fn run() -> Result<()> {
    println!(
        "{:<6} {:<14} {:>8} {:>8} {:>8} {:>6}",
        "tag", "name", "min", "max", "default", "step"
    );
    for axis in &AXES {
        println!(
            "{:<6} {:<14} {:>8} {:>8} {:>8} {:>6}",
            axis.tag,
            axis.name,
            axis.format(axis.min),
            axis.format(axis.max),
            axis.format(axis.normalized_default()),
            axis.format(axis.step()),
        );
    }
    Ok(())
}

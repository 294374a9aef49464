use anyhow::Result;
use log::info;

use crate::arguments::Arguments;
use crate::context::{PipelineContext, SharedValue};
use crate::incrementer::VersionCodeIncrementer;

/// Runs the increment step described by the command line and returns the outputs it published.
///
/// A dry run only reads the file. The outputs are appended to `--output-file` when one is given.
pub fn execute(args: &Arguments) -> Result<PipelineContext> {
    let incrementer = VersionCodeIncrementer::new(args.increment_options());
    let mut context = PipelineContext::new();

    if args.dry_run {
        let next = incrementer.current(&args.path)?.next()?;
        info!("Android version code would be incremented to {}", next);
        context.set(SharedValue::AndroidVersionCode, next);
    } else {
        incrementer.run(&args.path, &mut context)?;
    }

    if let Some(output_file) = &args.output_file {
        context.append_to(output_file)?;
    }

    Ok(context)
}

use std::error::Error as _;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_os = "windows")]
fn run() -> sensmatch::Result<()> {
    use std::ops::ControlFlow;
    use std::path::Path;

    use sensmatch::backends::windows::{EventPump, RawInputEnumerator, RegistryNameResolver};
    use sensmatch::config::Config;
    use sensmatch::registry::MAX_DEVICES;
    use sensmatch::{report, DeviceRegistry, Disposition, InputEventRouter};

    let config = Config::load(Path::new(Config::DEFAULT_PATH))?;

    // Register for input before enumerating, so nothing slips between the
    // device list and the first event.
    let pump = EventPump::new()?;

    let mut registry = DeviceRegistry::new();
    let populated = registry.populate(
        &mut RawInputEnumerator,
        &mut RegistryNameResolver,
        MAX_DEVICES,
    )?;
    log::info!("tracking {populated} device(s)");
    print!("{}", report::device_list(registry.devices()));
    println!("move each mouse through the same gesture, then press any key for the report");

    let mut router = InputEventRouter::new(registry, config.keys, config.repeat_policy);
    pump.run(|event| match router.handle_event(event) {
        Disposition::Quit => ControlFlow::Break(()),
        _ => ControlFlow::Continue(()),
    })
}

#[cfg(not(target_os = "windows"))]
fn run() -> sensmatch::Result<()> {
    Err(sensmatch::Error::EventSource(
        "no input backend for this platform; device input is read through Windows Raw Input".into(),
    ))
}

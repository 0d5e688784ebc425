use vlab_core::{BuildReport, Panel};

pub fn print_info(message: &str) {
    println!("[VLAB][INFO] {message}");
}

pub fn print_error(message: &str) {
    eprintln!("[VLAB][ERROR]: {message}");
}

pub fn print_registry(panel: &Panel) {
    let registry = panel.registry();
    if registry.is_empty() {
        print_info("No widgets registered");
        return;
    }
    print_info(&format!("{} widgets registered:", registry.len()));
    for (name, handle) in registry.registrations() {
        match panel.arena().get(*handle) {
            Some(node) => println!("{name} ({})", node.widget.kind()),
            None => println!("{name} (unknown)"),
        }
    }
}

pub fn print_failures(report: &BuildReport) {
    if report.failures.is_empty() {
        return;
    }
    print_info(&format!("{} entries skipped:", report.failures.len()));
    for failure in &report.failures {
        println!("{}: {}", failure.path, failure.error);
    }
}

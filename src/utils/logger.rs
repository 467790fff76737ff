use tracing_subscriber::fmt::Layer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "doctor_match=debug,info"
    } else {
        "doctor_match=info"
    }
}

/// `RUST_LOG` wins over the built-in directives.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

fn base_layer<S>() -> Layer<S> {
    tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    // stdout carries the match result, so logs go to stderr
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(base_layer().with_writer(std::io::stderr).compact())
        .init();
}

pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(env_filter(false))
        .with(base_layer().json()) // CloudWatch parses JSON lines
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_crate_debug() {
        assert_eq!(default_directives(true), "doctor_match=debug,info");
        assert_eq!(default_directives(false), "doctor_match=info");
    }
}

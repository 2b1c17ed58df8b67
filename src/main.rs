// src/main.rs
mod types;

use clap::Parser;
use kubeconfig_resolver::{
    config::ResolverConfig,
    error::error_chain,
    kubeconfig::{self, ConnectionProfile},
    resolver::{self, Config, KubeConfig},
    secrets::KubectlSecretStore,
    utils::logging::{FileLogger, Logger, MultiLogger, StderrLogger},
};
use std::{fs, io, path::Path};
use types::{Args, Command};

fn load_config(args: &Args) -> io::Result<ResolverConfig> {
    let mut config = if Path::new(&args.config).exists() {
        ResolverConfig::load_from_file(&args.config)?
    } else {
        ResolverConfig::default()
    };
    config.debug |= args.debug;
    Ok(config)
}

fn build_logger(config: &ResolverConfig) -> io::Result<Box<dyn Logger>> {
    let mut logger = MultiLogger::new().with(Box::new(StderrLogger::new(config.debug)));
    if let Some(path) = config.log_file_path() {
        logger = logger.with(Box::new(FileLogger::new(path, config.debug)?));
    }
    Ok(Box::new(logger))
}

fn render(
    host: String,
    ca: &Path,
    cert: &Path,
    key: &Path,
    cluster_name: &str,
    output: Option<&Path>,
) -> io::Result<()> {
    let profile = ConnectionProfile::new(host, fs::read(ca)?, fs::read(cert)?, fs::read(key)?);
    profile.validate_host()?;

    let yaml = kubeconfig::render_kubeconfig(&profile, cluster_name)?;
    match output {
        Some(path) => {
            fs::write(path, &yaml)?;
            // Private key material inside
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
            }
        }
        None => io::Write::write_all(&mut io::stdout(), &yaml)?,
    }
    Ok(())
}

fn resolve(args: &Args, secret_name: Option<String>, namespace: Option<String>) -> io::Result<()> {
    let config = load_config(args)?.with_overrides(secret_name, namespace)?;
    let reference = config.secret_ref();

    let logger = build_logger(&config)?;
    let ambient = if reference.is_ambient() {
        resolver::load_ambient_profile(&config.ambient_kubeconfig_path())?
    } else {
        ConnectionProfile::default()
    };

    let k = KubeConfig::new(Config {
        secrets: Some(Box::new(KubectlSecretStore::new(config.kubectl_path.clone()))),
        logger: Some(logger),
    })?;
    let profile = k.resolve(&reference, &ambient)?;

    println!("host: {}", profile.host);
    println!("certificate-authority-data: {} bytes", profile.ca_data.len());
    println!("client-certificate-data: {} bytes", profile.cert_data.len());
    println!("client-key-data: {} bytes", profile.key_data.len());
    Ok(())
}

fn inspect(file: &Path) -> io::Result<()> {
    let doc = kubeconfig::deserialize(&fs::read(file)?)?;

    println!("apiVersion: {}  kind: {}", doc.api_version, doc.kind);
    for cluster in &doc.clusters {
        println!("cluster  {}  {}", cluster.name, cluster.cluster.server);
    }
    for user in &doc.users {
        println!("user     {}", user.name);
    }
    for context in &doc.contexts {
        let marker = if context.name == doc.current_context { "*" } else { " " };
        println!(
            "context{} {}  cluster={} user={}",
            marker, context.name, context.context.cluster, context.context.user
        );
    }

    // Only single-entry documents flatten into a profile
    match kubeconfig::to_profile(&doc) {
        Ok(profile) => println!("profile  {}", profile.host),
        Err(e) => println!("profile  unavailable ({})", e),
    }
    Ok(())
}

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let res = match &args.command {
        Command::Render {
            host,
            ca,
            cert,
            key,
            cluster_name,
            output,
        } => render(host.clone(), ca, cert, key, cluster_name, output.as_deref()),
        Command::Resolve {
            secret_name,
            namespace,
        } => resolve(&args, secret_name.clone(), namespace.clone()),
        Command::Inspect { file } => inspect(file),
    };

    if let Err(err) = res {
        let chain = error_chain(&err);
        eprintln!("Error: {}", chain[0]);
        for cause in &chain[1..] {
            eprintln!("  caused by: {}", cause);
        }
        return Err(err);
    }

    Ok(())
}

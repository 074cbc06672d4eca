//! `pakt install`: manifest location, install-path precedence, and the
//! exit-code contract.

use crate::common::{DirAssert, TestProject};
use anyhow::Result;

#[test]
fn installs_into_environment_configured_path() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("configured");

    let output = project.run_pakt_env(
        &["install"],
        &[("PAKT_INSTALL_PATH", &target.display().to_string())],
    )?;

    output
        .assert_success()
        .assert_stdout_contains("Installed 1 package(s)")
        .assert_stdout_contains("(environment)");
    DirAssert::exists(target.join("packages/rack-1.0.0/lib"));
    Ok(())
}

#[test]
fn missing_manifest_exits_ten() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_pakt(&["install"])?;

    output.assert_code(10).assert_stderr_contains("Could not locate manifest");
    Ok(())
}

#[test]
fn no_upward_search_from_a_subdirectory() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let sub = project.project_path().join("sub");
    std::fs::create_dir_all(&sub)?;

    // The manifest sits one level up; pakt must not find it.
    let output = project.run_pakt_in(&sub, &["install"], &[])?;

    output.assert_code(10).assert_stderr_contains("Could not locate manifest");
    Ok(())
}

#[test]
fn manifest_path_accepts_the_project_directory() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("from-elsewhere");

    let manifest_dir = project.project_path().display().to_string();
    let output = project.run_pakt_in(
        project.elsewhere_path(),
        &["--manifest-path", &manifest_dir, "install"],
        &[("PAKT_INSTALL_PATH", &target.display().to_string())],
    )?;

    output.assert_success();
    DirAssert::exists(target.join("packages/rack-1.0.0"));
    Ok(())
}

#[test]
fn manifest_path_accepts_the_manifest_file_itself() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("via-file");

    let manifest_file = project.project_path().join("pakt.toml").display().to_string();
    let output = project.run_pakt_in(
        project.elsewhere_path(),
        &["--manifest-path", &manifest_file, "install"],
        &[("PAKT_INSTALL_PATH", &target.display().to_string())],
    )?;

    output.assert_success();
    DirAssert::exists(target.join("packages/rack-1.0.0"));
    Ok(())
}

#[test]
fn manifest_path_to_a_directory_without_manifest_exits_ten() -> Result<()> {
    let project = TestProject::new()?;

    let empty = project.elsewhere_path().display().to_string();
    let output = project.run_pakt(&["--manifest-path", &empty, "install"])?;

    output.assert_code(10).assert_stderr_contains("Could not locate manifest");
    Ok(())
}

#[test]
fn cli_path_override_wins_over_environment() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let env_target = project.install_target("from-env");
    let cli_target = project.install_target("from-cli");

    let output = project.run_pakt_env(
        &["install", "--path", &cli_target.display().to_string()],
        &[("PAKT_INSTALL_PATH", &env_target.display().to_string())],
    )?;

    output.assert_success().assert_stdout_contains("(command line)");
    DirAssert::exists(cli_target.join("packages/rack-1.0.0"));
    DirAssert::not_exists(&env_target);
    Ok(())
}

#[test]
fn local_config_wins_over_environment() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let local_target = project.install_target("from-local");
    let env_target = project.install_target("from-env");
    project
        .write_local_config(&format!("install-path = \"{}\"\n", local_target.display()))?;

    let output = project.run_pakt_env(
        &["install"],
        &[("PAKT_INSTALL_PATH", &env_target.display().to_string())],
    )?;

    output.assert_success().assert_stdout_contains("(local config)");
    DirAssert::exists(local_target.join("packages/rack-1.0.0"));
    DirAssert::not_exists(&env_target);
    Ok(())
}

#[test]
fn global_config_install_path_is_honored() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("from-global");
    project
        .write_global_config(&format!("install-path = \"{}\"\n", target.display()))?;

    let output = project.run_pakt(&["install"])?;

    output.assert_success().assert_stdout_contains("(global config)");
    DirAssert::exists(target.join("packages/rack-1.0.0"));
    DirAssert::not_exists(project.project_path().join("vendor"));
    Ok(())
}

#[test]
fn local_config_follows_the_manifest_project() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("project-local");
    project
        .write_local_config(&format!("install-path = \"{}\"\n", target.display()))?;

    // Invoked from outside the project: the project's own .pakt/config.toml
    // still applies because the local file anchors at the project root.
    let manifest_dir = project.project_path().display().to_string();
    let output = project.run_pakt_in(
        project.elsewhere_path(),
        &["--manifest-path", &manifest_dir, "install"],
        &[],
    )?;

    output.assert_success().assert_stdout_contains("(local config)");
    DirAssert::exists(target.join("packages/rack-1.0.0"));
    DirAssert::not_exists(project.elsewhere_path().join(".pakt"));
    Ok(())
}

#[test]
fn relative_install_path_resolves_against_invocation_dir() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;

    let manifest_dir = project.project_path().display().to_string();
    let output = project.run_pakt_in(
        project.elsewhere_path(),
        &["--manifest-path", &manifest_dir, "install"],
        &[("PAKT_INSTALL_PATH", "bundle-here")],
    )?;

    output.assert_success();
    // Relative to where the command ran, not to the manifest's directory.
    DirAssert::exists(project.elsewhere_path().join("bundle-here/packages/rack-1.0.0"));
    DirAssert::not_exists(project.project_path().join("bundle-here"));
    Ok(())
}

#[test]
fn default_install_lands_in_vendor() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;

    let output = project.run_pakt(&["install"])?;

    output.assert_success().assert_stdout_contains("(default)");
    DirAssert::exists(project.project_path().join("vendor/packages/rack-1.0.0/lib"));
    Ok(())
}

#[test]
fn second_install_is_idempotent() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("twice");
    let env = [("PAKT_INSTALL_PATH", target.display().to_string())];
    let env: Vec<(&str, &str)> = env.iter().map(|(k, v)| (*k, v.as_str())).collect();

    project.run_pakt_env(&["install"], &env)?.assert_success();
    let second = project.run_pakt_env(&["install"], &env)?;

    second
        .assert_success()
        .assert_stdout_contains("Installed 1 package(s)")
        .assert_stdout_contains("= rack");
    DirAssert::exists(target.join("packages/rack-1.0.0/lib"));
    Ok(())
}

#[test]
fn unsatisfiable_requirement_fails_without_writing() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", ">=9.0")]))?;
    let target = project.install_target("never");

    let output = project.run_pakt_env(
        &["install"],
        &[("PAKT_INSTALL_PATH", &target.display().to_string())],
    )?;

    output.assert_code(1).assert_stderr_contains("No version of package 'rack'");
    DirAssert::not_exists(&target);
    Ok(())
}

#[cfg(unix)]
#[test]
fn unwritable_target_exits_one() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("locked-down");

    std::fs::create_dir_all(&target)?;
    let mut perms = std::fs::metadata(&target)?.permissions();
    perms.set_mode(0o555);
    std::fs::set_permissions(&target, perms)?;
    if std::fs::create_dir(target.join("w")).is_ok() {
        // Permission bits are not enforced for this user (e.g. root).
        std::fs::remove_dir(target.join("w"))?;
        return Ok(());
    }

    let output = project.run_pakt_env(
        &["install"],
        &[("PAKT_INSTALL_PATH", &target.display().to_string())],
    )?;

    output.assert_code(1).assert_stderr_contains("Cannot install to");
    // No half-written state under the rejected target.
    DirAssert::entry_count(&target, 0);

    let mut perms = std::fs::metadata(&target)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&target, perms)?;
    Ok(())
}

#[test]
fn highest_satisfying_version_is_selected() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.add_registry_package("rack", "1.2.0")?;
    project.write_manifest(&project.manifest(&[("rack", ">=1.0")]))?;
    let target = project.install_target("highest");

    let output = project.run_pakt_env(
        &["install"],
        &[("PAKT_INSTALL_PATH", &target.display().to_string())],
    )?;

    output.assert_success();
    DirAssert::exists(target.join("packages/rack-1.2.0"));
    DirAssert::not_exists(target.join("packages/rack-1.0.0"));
    Ok(())
}

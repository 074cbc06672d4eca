//! `pakt show <package>`: installed-location reporting.

use crate::common::TestProject;
use anyhow::Result;

#[test]
fn prints_the_installed_package_location() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("shown");
    let path_value = target.display().to_string();

    project
        .run_pakt_env(&["install"], &[("PAKT_INSTALL_PATH", &path_value)])?
        .assert_success();
    let output = project.run_pakt_env(
        &["show", "rack"],
        &[("PAKT_INSTALL_PATH", &path_value)],
    )?;

    output.assert_success().assert_stdout_contains("packages/rack-1.0.0");
    Ok(())
}

#[test]
fn picks_the_highest_installed_version() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.add_registry_package("rack", "1.2.0")?;
    project.write_manifest(&project.manifest(&[("rack", ">=1.0")]))?;
    let target = project.install_target("versions");
    let path_value = target.display().to_string();

    project
        .run_pakt_env(&["install"], &[("PAKT_INSTALL_PATH", &path_value)])?
        .assert_success();
    let output = project.run_pakt_env(
        &["show", "rack"],
        &[("PAKT_INSTALL_PATH", &path_value)],
    )?;

    output.assert_success().assert_stdout_contains("rack-1.2.0");
    Ok(())
}

#[test]
fn reports_a_package_that_is_not_installed() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("empty");

    let output = project.run_pakt_env(
        &["show", "rack"],
        &[("PAKT_INSTALL_PATH", &target.display().to_string())],
    )?;

    output.assert_code(1).assert_stderr_contains("is not installed");
    Ok(())
}

#[test]
fn show_without_manifest_exits_ten() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_pakt(&["show", "rack"])?;

    output.assert_code(10).assert_stderr_contains("Could not locate manifest");
    Ok(())
}

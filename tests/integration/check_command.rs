//! `pakt check`: satisfaction reporting without installing.

use crate::common::TestProject;
use anyhow::Result;

#[test]
fn check_fails_before_install() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("checked");

    let output = project.run_pakt_env(
        &["check"],
        &[("PAKT_INSTALL_PATH", &target.display().to_string())],
    )?;

    output
        .assert_code(1)
        .assert_stderr_contains("dependencies could not be satisfied")
        .assert_stderr_contains("rack")
        .assert_stderr_contains("pakt install");
    Ok(())
}

#[test]
fn check_passes_after_install() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("checked");
    let path_value = target.display().to_string();

    project
        .run_pakt_env(&["install"], &[("PAKT_INSTALL_PATH", &path_value)])?
        .assert_success();
    let output = project.run_pakt_env(&["check"], &[("PAKT_INSTALL_PATH", &path_value)])?;

    output.assert_success().assert_stdout_contains("satisfied");
    Ok(())
}

#[test]
fn check_does_not_install_anything() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("untouched");

    project.run_pakt_env(
        &["check"],
        &[("PAKT_INSTALL_PATH", &target.display().to_string())],
    )?;

    assert!(!target.exists());
    Ok(())
}

#[test]
fn check_rejects_an_unsatisfying_installed_version() -> Result<()> {
    let project = TestProject::new()?;
    project.add_registry_package("rack", "1.0.0")?;
    project.write_manifest(&project.manifest(&[("rack", "1.0.0")]))?;
    let target = project.install_target("version-drift");
    let path_value = target.display().to_string();

    project
        .run_pakt_env(&["install"], &[("PAKT_INSTALL_PATH", &path_value)])?
        .assert_success();
    // The manifest moves on; the installed 1.0.0 no longer satisfies it.
    project.write_manifest(&project.manifest(&[("rack", "^2.0")]))?;

    let output = project.run_pakt_env(&["check"], &[("PAKT_INSTALL_PATH", &path_value)])?;
    output.assert_code(1).assert_stderr_contains("dependencies could not be satisfied");
    Ok(())
}

#[test]
fn check_without_manifest_exits_ten() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_pakt(&["check"])?;

    output.assert_code(10).assert_stderr_contains("Could not locate manifest");
    Ok(())
}

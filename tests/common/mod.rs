//! Common test utilities for engine tests
//!
//! Real HMMER binaries are replaced by small shell scripts. Every mock
//! records its argument vector, one argument per line, in `<binary>.args`
//! next to itself so tests can assert the exact command line.
#![allow(dead_code)]

use hmmer::config::WorkspaceConfig;
use hmmer::tools::BinaryTable;
use hmmer::Hmmer;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TBLOUT: &str = include_str!("../fixtures/tblout.txt");
pub const DOMTBLOUT: &str = include_str!("../fixtures/domtblout.txt");

const FETCH_SCRIPT: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$0.args"
if [ "$1" = "--index" ]; then
    : > "$2.ssi"
    exit 0
fi
if [ "$1" = "-f" ]; then
    while read -r key; do
        printf 'HMMER3/f\nNAME  %s\n//\n' "$key"
    done < "$3"
    exit 0
fi
if [ "$2" = "MISSING" ]; then
    echo "Error: HMM MISSING not found in $1" >&2
    exit 1
fi
printf 'HMMER3/f\nNAME  %s\n//\n' "$2"
"#;

const PRESS_SCRIPT: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$0.args"
for ext in h3f h3i h3m h3p; do
    : > "$1.$ext"
done
"#;

const SEARCH_SCRIPT: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$0.args"
out=""
tbl=""
dom=""
while [ "$#" -gt 2 ]; do
    case "$1" in
        -o) out="$2"; shift 2 ;;
        --tblout) tbl="$2"; shift 2 ;;
        --domtblout) dom="$2"; shift 2 ;;
        -Z) shift 2 ;;
        *) shift ;;
    esac
done
profile="$1"
target="$2"
if [ "$profile" = "-" ]; then
    cat > "$0.stdin"
    if ! grep -q NAME "$0.stdin"; then
        echo "Error: failed to read HMM from stdin" >&2
        exit 1
    fi
fi
if [ ! -f "$target" ]; then
    echo "Error: sequence file $target not found" >&2
    exit 2
fi
cp "$target" "$0.target"
if [ -n "$out" ]; then
    echo "main output" > "$out"
fi
if [ -n "$tbl" ]; then
    cat > "$tbl" <<'TABLE'
@TBLOUT@
TABLE
fi
if [ -n "$dom" ]; then
    cat > "$dom" <<'TABLE'
@DOMTBLOUT@
TABLE
fi
exit 0
"#;

const EMIT_SCRIPT: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$0.args"
cat > "$0.stdin"
if ! grep -q NAME "$0.stdin"; then
    echo "Error: failed to read HMM from stdin" >&2
    exit 1
fi
n=1
consensus=0
while [ "$#" -gt 0 ]; do
    case "$1" in
        -N) n="$2"; shift 2 ;;
        -c) consensus=1; shift ;;
        --seed) shift 2 ;;
        *) shift ;;
    esac
done
if [ "$consensus" = 1 ]; then
    printf '>consensus\nMKVLA\n'
    exit 0
fi
i=1
while [ "$i" -le "$n" ]; do
    printf '>sample%s desc\nACDEFG\nHIK\n' "$i"
    i=$((i + 1))
done
"#;

const SLOW_SCRIPT: &str = r#"#!/bin/sh
printf '%s\n' "$@" > "$0.args"
exec sleep 5
"#;

/// A directory of mock binaries, a profile file and a workspace parent
pub struct MockSuite {
    pub dir: TempDir,
    pub bin: PathBuf,
    pub profile: PathBuf,
    pub workspaces: PathBuf,
}

impl MockSuite {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let bin = dir.path().join("bin");
        let workspaces = dir.path().join("workspaces");
        fs::create_dir_all(&bin).unwrap();
        fs::create_dir_all(&workspaces).unwrap();

        let profile = dir.path().join("Pfam-A.hmm");
        fs::write(&profile, "HMMER3/f\nNAME  Octapeptide\n//\n").unwrap();

        let search = SEARCH_SCRIPT
            .replace("@TBLOUT@", TBLOUT.trim_end())
            .replace("@DOMTBLOUT@", DOMTBLOUT.trim_end());

        write_script(&bin.join("hmmfetch"), FETCH_SCRIPT);
        write_script(&bin.join("hmmpress"), PRESS_SCRIPT);
        write_script(&bin.join("hmmscan"), &search);
        write_script(&bin.join("hmmsearch"), &search);
        write_script(&bin.join("hmmemit"), EMIT_SCRIPT);

        Self {
            dir,
            bin,
            profile,
            workspaces,
        }
    }

    /// Replace one binary with a script that never finishes in time
    pub fn make_slow(&self, binary: &str) {
        write_script(&self.bin.join(binary), SLOW_SCRIPT);
    }

    pub fn engine(&self) -> Hmmer {
        Hmmer::with_binaries(&self.profile, BinaryTable::from_dir(&self.bin))
            .unwrap()
            .with_workspace_config(WorkspaceConfig {
                root: Some(self.workspaces.clone()),
            })
    }

    /// Arguments of the last invocation of `binary`
    pub fn last_args(&self, binary: &str) -> Vec<String> {
        let path = self.bin.join(format!("{binary}.args"));
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("{binary} was never invoked"))
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn was_invoked(&self, binary: &str) -> bool {
        self.bin.join(format!("{binary}.args")).exists()
    }

    /// What `binary` read from its stdin on the last invocation
    pub fn stdin_of(&self, binary: &str) -> String {
        fs::read_to_string(self.bin.join(format!("{binary}.stdin"))).unwrap_or_default()
    }

    /// Contents of the target file `binary` was handed
    pub fn target_of(&self, binary: &str) -> String {
        fs::read_to_string(self.bin.join(format!("{binary}.target"))).unwrap_or_default()
    }

    /// Temp workspaces still on disk
    pub fn leftover_workspaces(&self) -> usize {
        fs::read_dir(&self.workspaces).unwrap().count()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write_sequences(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, ">AE014075.1:190-252|amino|11\nMKRISTTITTTITITTGNGAG\n").unwrap();
        path
    }
}

pub fn write_script(path: &Path, script: &str) {
    fs::write(path, script).unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).unwrap();
    }
}

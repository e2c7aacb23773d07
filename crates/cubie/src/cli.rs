use std::path::PathBuf;

use cgmath::{Deg, Point2};
use cubie_core::{Face, TurnRequest};
use cubie_prefs::Preferences;
use cubie_view::{CubeSimulation, OrbitCamera, PointerEvent, ScrambleParams};
use eyre::{Context, OptionExt, Result, ensure};
use serde::Serialize;

use crate::headless::{CubeSnapshot, FrameClock, HeadlessScene, TurnSnapshot};

/// Cubie command-line interface
///
/// Every command runs the simulation headless with a fixed frame rate and
/// prints the result as JSON.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Preferences file to use instead of the default one.
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Scramble the puzzle and print the turns and the final state.
    Scramble {
        /// Random seed. If omitted, a random one is chosen.
        #[arg(short, long)]
        seed: Option<String>,
        /// Number of turns, overriding preferences.
        #[arg(short, long)]
        moves: Option<usize>,
    },
    /// Scramble the puzzle, then solve it and check that it is back where it
    /// started.
    Solve {
        /// Random seed for the scramble.
        #[arg(short, long)]
        seed: Option<String>,
    },
    /// Turn the outer layer of one face a quarter turn.
    Turn {
        /// Face whose layer to turn: `right`, `left`, `top`, `bottom`,
        /// `front`, or `back`.
        face: Face,
        /// Turn counterclockwise as seen from outside the face.
        #[arg(long)]
        inverse: bool,
    },
    /// Replay one pointer drag on a virtual viewport.
    Drag {
        /// Where the pointer is pressed, as `X,Y` in pixels.
        #[arg(long, value_parser = parse_point)]
        from: Point2<f32>,
        /// Where the pointer is released, as `X,Y` in pixels.
        #[arg(long, value_parser = parse_point)]
        to: Point2<f32>,
        /// Viewport width in pixels.
        #[arg(long, default_value_t = 800.0)]
        width: f32,
        /// Viewport height in pixels.
        #[arg(long, default_value_t = 600.0)]
        height: f32,
        /// Camera yaw in degrees.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        yaw: f32,
        /// Camera pitch in degrees.
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        pitch: f32,
    },
    /// Print the preferences in effect as YAML.
    Prefs,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let prefs = Preferences::load(args.prefs.as_deref());

    match args.subcommand {
        Subcommand::Scramble { seed, moves } => {
            let mut prefs = prefs;
            if let Some(moves) = moves {
                prefs.interaction.scramble_moves = moves;
            }
            let mut sim = CubeSimulation::new(&prefs);
            let mut scene = HeadlessScene::default();
            sim.attach(&mut scene);
            let mut clock = FrameClock::default();

            let params = seed.map_or_else(ScrambleParams::random, ScrambleParams::new);
            ensure!(sim.randomize(params), "puzzle is busy");
            let frames = clock.run_until_idle(&mut sim, &mut scene)?;

            let scramble = sim.scramble().ok_or_eyre("no scramble was generated")?;
            write_json_output(&ScrambleOutput {
                seed: scramble.params().seed.clone(),
                turns: scramble.history().iter().map(TurnSnapshot::from).collect(),
                frames,
                cube: CubeSnapshot::new(sim.puzzle()),
            })
        }

        Subcommand::Solve { seed } => {
            let mut sim = CubeSimulation::new(&prefs);
            let mut scene = HeadlessScene::default();
            sim.attach(&mut scene);
            let mut clock = FrameClock::default();

            let params = seed.map_or_else(ScrambleParams::random, ScrambleParams::new);
            ensure!(sim.randomize(params.clone()), "puzzle is busy");
            clock.run_until_idle(&mut sim, &mut scene)?;
            let scrambled = CubeSnapshot::new(sim.puzzle());

            ensure!(sim.solve(), "puzzle is busy");
            let frames = clock.run_until_idle(&mut sim, &mut scene)?;
            ensure!(
                sim.cube().is_at_initial_lattice(),
                "solve did not restore the initial arrangement",
            );

            write_json_output(&SolveOutput {
                seed: params.seed,
                frames,
                scrambled,
                solved: CubeSnapshot::new(sim.puzzle()),
            })
        }

        Subcommand::Turn { face, inverse } => {
            let mut sim = CubeSimulation::new(&prefs);
            let mut scene = HeadlessScene::default();
            sim.attach(&mut scene);
            let mut clock = FrameClock::default();

            let request = face_turn(&sim, face, inverse)?;
            ensure!(sim.rotate_slice(request), "puzzle is busy");
            let frames = clock.run_until_idle(&mut sim, &mut scene)?;

            log::info!("turned {face} with {request}");
            write_json_output(&TurnOutput {
                turn: TurnSnapshot::from(&request),
                frames,
                cube: CubeSnapshot::new(sim.puzzle()),
            })
        }

        Subcommand::Drag {
            from,
            to,
            width,
            height,
            yaw,
            pitch,
        } => {
            ensure!(width > 0.0 && height > 0.0, "viewport must not be empty");

            let mut sim = CubeSimulation::new(&prefs);
            let mut scene = HeadlessScene::default();
            sim.attach(&mut scene);
            let mut clock = FrameClock::default();

            let mut camera = OrbitCamera::new(&prefs.view);
            camera.viewport_size = [width, height];
            camera.set_angles(Deg(yaw), Deg(pitch));

            sim.pointer_down(&mut camera, PointerEvent::primary(from.x, from.y));
            let anchored = sim.gesture().anchor().is_some();
            let turn = sim.pointer_move(&camera, PointerEvent::primary(to.x, to.y));
            sim.pointer_up(&mut camera);
            let frames = clock.run_until_idle(&mut sim, &mut scene)?;

            match turn {
                Some(request) => log::info!("drag turned {request}"),
                None => log::info!("drag did not turn anything"),
            }
            write_json_output(&DragOutput {
                anchored,
                turn: turn.as_ref().map(TurnSnapshot::from),
                frames,
                cube: CubeSnapshot::new(sim.puzzle()),
            })
        }

        Subcommand::Prefs => {
            print!("{}", prefs.to_yaml()?);
            Ok(())
        }
    }
}

#[derive(Serialize, Debug)]
struct ScrambleOutput {
    seed: String,
    turns: Vec<TurnSnapshot>,
    frames: usize,
    cube: CubeSnapshot,
}

#[derive(Serialize, Debug)]
struct SolveOutput {
    seed: String,
    frames: usize,
    scrambled: CubeSnapshot,
    solved: CubeSnapshot,
}

#[derive(Serialize, Debug)]
struct TurnOutput {
    turn: TurnSnapshot,
    frames: usize,
    cube: CubeSnapshot,
}

#[derive(Serialize, Debug)]
struct DragOutput {
    anchored: bool,
    turn: Option<TurnSnapshot>,
    frames: usize,
    cube: CubeSnapshot,
}

/// Returns the request that turns the outer layer of `face` clockwise as seen
/// from outside, or counterclockwise if `inverse` is set.
fn face_turn(sim: &CubeSimulation, face: Face, inverse: bool) -> Result<TurnRequest> {
    let (cubie, _) = sim
        .cube()
        .iter()
        .find(|(_, cubie)| face.touches(cubie.lattice()))
        .ok_or_eyre("face has no cubies")?;
    // Layers turn about the complement of the requested axis.
    let clockwise = -face.sign();
    Ok(TurnRequest {
        cubie,
        axis: face.axis().complementary(),
        direction: if inverse { -clockwise } else { clockwise },
    })
}

fn parse_point(s: &str) -> Result<Point2<f32>, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `X,Y`, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("bad coordinate {v:?}: {e}"))
    };
    Ok(Point2::new(parse(x)?, parse(y)?))
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("400,300"), Ok(Point2::new(400.0, 300.0)));
        assert_eq!(parse_point(" 1.5 , -2 "), Ok(Point2::new(1.5, -2.0)));
        assert!(parse_point("400").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_cli_args() {
        use clap::Parser;

        let args = Args::try_parse_from([
            "cubie", "drag", "--from", "400,300", "--to", "420,300", "--yaw", "-30",
        ])
        .unwrap();
        match args.subcommand {
            Subcommand::Drag { from, yaw, .. } => {
                assert_eq!(from, Point2::new(400.0, 300.0));
                assert_eq!(yaw, -30.0);
            }
            other => panic!("unexpected subcommand {other:?}"),
        }

        let args = Args::try_parse_from(["cubie", "scramble", "--seed", "abc", "--prefs", "p.yaml"])
            .unwrap();
        assert_eq!(args.prefs, Some(PathBuf::from("p.yaml")));

        let args = Args::try_parse_from(["cubie", "turn", "front", "--inverse"]).unwrap();
        match args.subcommand {
            Subcommand::Turn { face, inverse } => {
                assert_eq!(face, Face::Front);
                assert!(inverse);
            }
            other => panic!("unexpected subcommand {other:?}"),
        }
        assert!(Args::try_parse_from(["cubie", "turn", "middle"]).is_err());
    }

    #[test]
    fn test_face_turn_moves_only_that_face() {
        use cubie_core::Axis;

        let sim = CubeSimulation::default();
        let request = face_turn(&sim, Face::Top, false).unwrap();
        assert_eq!(request.slice_axis(), Axis::Y);
        assert_eq!(sim.cube()[request.cubie].lattice().y, 1);
        // Clockwise from above is a negative turn about +Y.
        assert_eq!(request.direction, cubie_core::Sign::Neg);

        let request = face_turn(&sim, Face::Back, true).unwrap();
        assert_eq!(request.slice_axis(), Axis::Z);
        assert_eq!(sim.cube()[request.cubie].lattice().z, -1);
        assert_eq!(request.direction, cubie_core::Sign::Neg);
    }
}

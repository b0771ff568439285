//! nv2a-pbtrace - dump the push-buffer stream of a GL ES scene
//!
//! Runs one of a few canned scenes against a [`RecordingDevice`] and prints
//! every method the context emitted, batch by batch.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use nv2a_gles::{Context, ContextConfig, GlResult, RecordingDevice, TexImage2D, gl};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "nv2a-pbtrace")]
#[command(about = "Print the NV2A methods a GL ES 1.1 scene produces")]
#[command(version)]
struct Cli {
    /// Scene to run
    #[arg(value_enum, default_value_t = Scene::Triangle)]
    scene: Scene,

    /// Context configuration (TOML); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Include the batches emitted while creating the context
    #[arg(long)]
    with_init: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Scene {
    /// Unlit triangle from a vertex buffer
    Triangle,
    /// Two lights, one of them a spot, with color material
    Lit,
    /// Linear fog over a triangle strip
    Fog,
    /// Two textured units blended through GL_COMBINE
    Combine,
    /// A user clip plane next to two texture units
    Clip,
    /// Attenuated point sprites with a point size array
    Sprites,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct TraceBatch {
    index: usize,
    commands: Vec<TraceCommand>,
}

#[derive(Serialize)]
struct TraceCommand {
    method: u32,
    params: Vec<u32>,
}

/// Triangle corners as x, y, z floats.
const TRIANGLE: [f32; 9] = [-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0];

/// Uploads `TRIANGLE` into a fresh array buffer and points the vertex array at it.
fn bind_triangle(ctx: &mut Context<RecordingDevice>) -> GlResult<()> {
    let bytes: &[u8] = bytemuck::cast_slice(&TRIANGLE);
    let name = ctx.gen_buffers(1)?[0];
    ctx.bind_buffer(gl::ARRAY_BUFFER, name)?;
    ctx.buffer_data(gl::ARRAY_BUFFER, bytes.len() as isize, Some(bytes), gl::STATIC_DRAW)?;
    ctx.vertex_pointer(3, gl::FLOAT, 0, 0)?;
    ctx.enable_client_state(gl::VERTEX_ARRAY)
}

/// Binds a 2x2 checkerboard to the active unit and enables texturing on it.
fn bind_checkerboard(ctx: &mut Context<RecordingDevice>) -> GlResult<()> {
    const TEXELS: [u8; 16] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0xFF, //
        0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    ];
    let name = ctx.gen_textures(1)?[0];
    ctx.bind_texture(gl::TEXTURE_2D, name)?;
    ctx.tex_parameter_i(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as i32)?;
    ctx.tex_image_2d(&TexImage2D {
        target: gl::TEXTURE_2D,
        level: 0,
        internal_format: gl::RGBA,
        width: 2,
        height: 2,
        border: 0,
        format: gl::RGBA,
        ty: gl::UNSIGNED_BYTE,
        pixels: Some(&TEXELS),
    })?;
    ctx.enable(gl::TEXTURE_2D)
}

fn run_scene(ctx: &mut Context<RecordingDevice>, scene: Scene) -> GlResult<()> {
    ctx.matrix_mode(gl::PROJECTION)?;
    ctx.frustum(-1.0, 1.0, -0.75, 0.75, 1.0, 100.0)?;
    ctx.matrix_mode(gl::MODELVIEW)?;
    ctx.translate(0.0, 0.0, -4.0);

    match scene {
        Scene::Triangle => {
            bind_triangle(ctx)?;
            ctx.clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT)?;
            ctx.draw_arrays(gl::TRIANGLES, 0, 3)
        }
        Scene::Lit => {
            bind_triangle(ctx)?;
            ctx.enable(gl::LIGHTING)?;
            ctx.enable(gl::LIGHT0)?;
            ctx.light_fv(gl::LIGHT0, gl::POSITION, &[0.0, 0.0, 1.0, 0.0])?;
            let spot = gl::LIGHT0 + 1;
            ctx.enable(spot)?;
            ctx.light_fv(spot, gl::POSITION, &[0.0, 2.0, 0.0, 1.0])?;
            ctx.light_fv(spot, gl::SPOT_DIRECTION, &[0.0, -1.0, 0.0])?;
            ctx.light_f(spot, gl::SPOT_CUTOFF, 30.0)?;
            ctx.material_f(gl::FRONT_AND_BACK, gl::SHININESS, 16.0)?;
            ctx.enable(gl::COLOR_MATERIAL)?;
            ctx.normal3f(0.0, 0.0, 1.0);
            ctx.draw_arrays(gl::TRIANGLES, 0, 3)
        }
        Scene::Fog => {
            bind_triangle(ctx)?;
            ctx.enable(gl::FOG)?;
            ctx.fog_f(gl::FOG_MODE, gl::LINEAR as f32)?;
            ctx.fog_f(gl::FOG_START, 2.0)?;
            ctx.fog_f(gl::FOG_END, 10.0)?;
            ctx.fog_fv(gl::FOG_COLOR, &[0.5, 0.5, 0.6, 1.0])?;
            ctx.draw_arrays(gl::TRIANGLE_STRIP, 0, 3)
        }
        Scene::Combine => {
            bind_triangle(ctx)?;
            bind_checkerboard(ctx)?;
            ctx.active_texture(gl::TEXTURE0 + 1)?;
            bind_checkerboard(ctx)?;
            ctx.tex_env_i(gl::TEXTURE_ENV, gl::TEXTURE_ENV_MODE, gl::COMBINE as i32)?;
            ctx.tex_env_i(gl::TEXTURE_ENV, gl::COMBINE_RGB, gl::INTERPOLATE as i32)?;
            ctx.tex_env_i(gl::TEXTURE_ENV, gl::SRC0_RGB, gl::TEXTURE as i32)?;
            ctx.tex_env_i(gl::TEXTURE_ENV, gl::SRC1_RGB, gl::PREVIOUS as i32)?;
            ctx.tex_env_i(gl::TEXTURE_ENV, gl::SRC2_RGB, gl::CONSTANT as i32)?;
            ctx.tex_env_fv(gl::TEXTURE_ENV, gl::TEXTURE_ENV_COLOR, &[0.25, 0.25, 0.25, 1.0])?;
            ctx.tex_env_f(gl::TEXTURE_ENV, gl::RGB_SCALE, 2.0)?;
            ctx.draw_arrays(gl::TRIANGLES, 0, 3)
        }
        Scene::Clip => {
            bind_triangle(ctx)?;
            bind_checkerboard(ctx)?;
            ctx.active_texture(gl::TEXTURE0 + 1)?;
            bind_checkerboard(ctx)?;
            ctx.clip_plane(gl::CLIP_PLANE0, &[1.0, 0.0, 0.0, 0.0])?;
            ctx.enable(gl::CLIP_PLANE0)?;
            ctx.draw_arrays(gl::TRIANGLES, 0, 3)
        }
        Scene::Sprites => {
            bind_triangle(ctx)?;
            bind_checkerboard(ctx)?;
            ctx.enable(gl::POINT_SPRITE_OES)?;
            ctx.tex_env_i(gl::POINT_SPRITE_OES, gl::COORD_REPLACE_OES, 1)?;
            ctx.point_parameter_fv(gl::POINT_DISTANCE_ATTENUATION, &[1.0, 0.0, 0.1])?;
            ctx.point_parameter_f(gl::POINT_SIZE_MIN, 1.0)?;
            ctx.point_parameter_f(gl::POINT_SIZE_MAX, 32.0)?;
            ctx.point_size_pointer(gl::FLOAT, 12, 8)?;
            ctx.enable_client_state(gl::POINT_SIZE_ARRAY_OES)?;
            ctx.draw_arrays(gl::POINTS, 0, 3)
        }
    }
}

fn collect(device: &RecordingDevice, skip: usize) -> Vec<TraceBatch> {
    device
        .batches()
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(index, batch)| TraceBatch {
            index,
            commands: batch
                .iter()
                .map(|c| TraceCommand {
                    method: c.method,
                    params: c.params.to_vec(),
                })
                .collect(),
        })
        .collect()
}

fn print_text(batches: &[TraceBatch]) {
    for batch in batches {
        println!("batch {}", batch.index);
        for cmd in &batch.commands {
            let params: Vec<String> = cmd.params.iter().map(|p| format!("{p:08x}")).collect();
            println!("  {:04x}  {}", cmd.method, params.join(" "));
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ContextConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ContextConfig::default(),
    };

    let mut ctx = Context::new(RecordingDevice::new(), config)?;
    let init_batches = if cli.with_init {
        0
    } else {
        ctx.device().batches().len()
    };

    if let Err(err) = run_scene(&mut ctx, cli.scene) {
        anyhow::bail!("scene rejected by the context: {err}");
    }
    let leftover = ctx.get_error();
    if leftover != nv2a_gles::NO_ERROR {
        tracing::warn!(code = %format!("{leftover:#06x}"), "scene left a GL error behind");
    }

    let batches = collect(ctx.device(), init_batches);
    match cli.format {
        Format::Text => print_text(&batches),
        Format::Json => println!("{}", serde_json::to_string_pretty(&batches)?),
    }

    tracing::info!(
        batches = batches.len(),
        commands = batches.iter().map(|b| b.commands.len()).sum::<usize>(),
        uploads = ctx.device().uploads.len(),
        "trace complete"
    );
    Ok(())
}

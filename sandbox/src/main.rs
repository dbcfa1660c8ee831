// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Ember Sandbox
// Streams geometry from worker threads while a render thread replays the frame.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use ember_core::renderer::*;
use ember_infra::HeadlessDevice;
use ember_rhi::{ReadbackSlot, RenderContexts, RenderContextsConfig, ScopedDebugGroup};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 3],
}

const VERTICES: &[Vertex] = &[
    Vertex {
        position: [0.0, 0.5, 0.0],
        color: [1.0, 0.0, 0.0],
    },
    Vertex {
        position: [-0.5, -0.5, 0.0],
        color: [0.0, 1.0, 0.0],
    },
    Vertex {
        position: [0.5, -0.5, 0.0],
        color: [0.0, 0.0, 1.0],
    },
];

const STREAMERS: usize = 2;
const UPLOADS_PER_STREAMER: u32 = 50;
const FRAME_TIME: Duration = Duration::from_millis(2);

/// Records one frame into the render thread's own list.
fn record_frame(contexts: &RenderContexts, frame: u64, timer: QueryId, gpu_time: &ReadbackSlot<u64>) {
    let immediate = contexts.immediate();
    let _frame_group = ScopedDebugGroup::new(immediate, &format!("frame {frame}"));

    immediate.begin_query(QueryTarget::TimeElapsed, timer);
    immediate.bind_framebuffer(FramebufferTarget::Draw, FramebufferId::BACKBUFFER);
    immediate.viewport(0, 0, 1280, 720);
    immediate.clear_color(0.1, 0.1, 0.12, 1.0);
    immediate.clear(ClearFlags::COLOR | ClearFlags::DEPTH);
    immediate.enable(Capability::DepthTest);
    immediate.use_program(ProgramId(1));
    immediate.bind_vertex_array(VertexArrayId(1));
    immediate.draw_arrays(PrimitiveTopology::TriangleList, 0, VERTICES.len() as u32);
    immediate.end_query(QueryTarget::TimeElapsed);
    immediate.get_query_result_u64(timer, gpu_time);
}

/// Uploads geometry from a worker thread, then releases its buffer.
fn stream_geometry(contexts: Arc<RenderContexts>, device: Arc<HeadlessDevice>, streamer: usize) {
    let buffer = device.create_buffers(1)[0];
    let sampler = device.create_samplers(1)[0];
    log::info!("Streamer {streamer} uploading into {buffer:?}");

    contexts.enqueue_render_command(move |hook_list| {
        hook_list.bind_sampler(streamer as u32, sampler);
    });

    for upload in 0..UPLOADS_PER_STREAMER {
        let offset = u64::from(upload) * std::mem::size_of_val(VERTICES) as u64;
        contexts.enqueue_render_command(move |hook_list| {
            hook_list.named_buffer_sub_data(buffer, offset, bytemuck::cast_slice(VERTICES));
        });
    }

    // The deferred list deletes both objects once every upload above has executed.
    contexts.deferred().register_deferred_buffer_cleanup(buffer);
    contexts.deferred().register_deferred_sampler_cleanup(sampler);
    contexts.flush_render_command(true);
    log::info!("Streamer {streamer} done");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => RenderContextsConfig::from_file(&path)
            .with_context(|| format!("failed to load render contexts config from '{path}'"))?,
        None => RenderContextsConfig::default(),
    };

    let device = Arc::new(HeadlessDevice::new());
    let timer = device.create_queries(1)[0];
    device.set_query_result(timer, 1_250_000);
    let contexts = Arc::new(RenderContexts::new(device.clone(), &config));
    let running = Arc::new(AtomicBool::new(true));

    let render_thread = {
        let contexts = Arc::clone(&contexts);
        let running = Arc::clone(&running);
        thread::Builder::new()
            .name("render".into())
            .spawn(move || {
                contexts.bind_render_thread();
                let gpu_time = ReadbackSlot::new();
                let mut frame = 0u64;
                while running.load(Ordering::Acquire) {
                    record_frame(&contexts, frame, timer, &gpu_time);
                    contexts.flush_frame();
                    if let Some(ns) = gpu_time.take() {
                        log::debug!("Frame {frame}: {:.3} ms on the GPU", ns as f64 / 1.0e6);
                    }
                    frame += 1;
                    thread::sleep(FRAME_TIME);
                }
                // Drain whatever was enqueued after the last frame.
                contexts.flush_frame();
                frame
            })?
    };

    let streamers = (0..STREAMERS)
        .map(|streamer| {
            let contexts = Arc::clone(&contexts);
            let device = Arc::clone(&device);
            thread::Builder::new()
                .name(format!("streamer-{streamer}"))
                .spawn(move || stream_geometry(contexts, device, streamer))
        })
        .collect::<std::io::Result<Vec<_>>>()?;

    for streamer in streamers {
        streamer
            .join()
            .map_err(|_| anyhow!("a streamer thread panicked"))?;
    }

    running.store(false, Ordering::Release);
    let frames = render_thread
        .join()
        .map_err(|_| anyhow!("the render thread panicked"))?;

    let mut histogram = BTreeMap::new();
    for call in device.calls() {
        *histogram.entry(call.name()).or_insert(0usize) += 1;
    }
    log::info!("Rendered {frames} frames, {} device calls", device.call_count());
    for (name, count) in &histogram {
        log::info!("  {name:<24} {count}");
    }
    contexts.log_stats_summary();

    Ok(())
}

use heartglow_platform::{
    DrawCommand, FrameClock, FramePacer, Key, MonitorRect, OverlayOptions, OverlayWindow,
    RenderSurface, Result, Rgb, SurfaceEvent,
};
use tracing::{debug, warn};

use windows::Win32::Foundation::{COLORREF, HWND, RECT};
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, CreateSolidBrush, DeleteDC, DeleteObject,
    Ellipse, FillRect, GetDC, GetStockObject, ReleaseDC, SelectObject, HBITMAP, HDC, HGDIOBJ,
    NULL_PEN, SRCCOPY,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{GetAsyncKeyState, VK_ESCAPE};
use windows::Win32::UI::WindowsAndMessaging::*;

fn colorref(color: Rgb) -> COLORREF {
    COLORREF(color.r as u32 | (color.g as u32) << 8 | (color.b as u32) << 16)
}

/// One overlay window plus the off-screen GDI buffer frames are drawn into.
pub struct WinOverlaySurface {
    hwnd: HWND,
    window_dc: HDC,
    buffer_dc: HDC,
    bitmap: HBITMAP,
    previous_bitmap: HGDIOBJ,
    width: i32,
    height: i32,
    clock: FrameClock,
    pacer: FramePacer,
    escape_down: bool,
}

impl WinOverlaySurface {
    pub(crate) fn new(hwnd: HWND, rect: &MonitorRect, options: &OverlayOptions) -> Result<Self> {
        unsafe {
            SetLayeredWindowAttributes(hwnd, colorref(options.color_key), 0, LWA_COLORKEY)?;
            let window_dc = GetDC(hwnd);
            if window_dc.is_invalid() {
                return Err("GetDC failed for overlay window".into());
            }
            let buffer_dc = CreateCompatibleDC(window_dc);
            let bitmap = CreateCompatibleBitmap(window_dc, rect.width, rect.height);
            if buffer_dc.is_invalid() || bitmap.is_invalid() {
                ReleaseDC(hwnd, window_dc);
                return Err("failed to allocate the overlay back buffer".into());
            }
            let previous_bitmap = SelectObject(buffer_dc, HGDIOBJ(bitmap.0));
            SelectObject(buffer_dc, GetStockObject(NULL_PEN));
            Ok(Self {
                hwnd,
                window_dc,
                buffer_dc,
                bitmap,
                previous_bitmap,
                width: rect.width,
                height: rect.height,
                clock: FrameClock::new(),
                pacer: FramePacer::new(options.target_fps),
                escape_down: false,
            })
        }
    }

    pub(crate) fn show(&self) {
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOWNOACTIVATE);
        }
    }

    fn fill_rect(&self, left: i32, top: i32, right: i32, bottom: i32, color: Rgb) {
        let rect = RECT {
            left,
            top,
            right,
            bottom,
        };
        unsafe {
            let brush = CreateSolidBrush(colorref(color));
            FillRect(self.buffer_dc, &rect, brush);
            let _ = DeleteObject(HGDIOBJ(brush.0));
        }
    }

    fn fill_circle(&self, x: i32, y: i32, radius: i32, color: Rgb) {
        unsafe {
            let brush = CreateSolidBrush(colorref(color));
            let previous = SelectObject(self.buffer_dc, HGDIOBJ(brush.0));
            let _ = Ellipse(
                self.buffer_dc,
                x - radius,
                y - radius,
                x + radius + 1,
                y + radius + 1,
            );
            SelectObject(self.buffer_dc, previous);
            let _ = DeleteObject(HGDIOBJ(brush.0));
        }
    }

    fn escape_pressed(&mut self) -> bool {
        // Click-through windows never take focus, so read the key state directly.
        let state = unsafe { GetAsyncKeyState(VK_ESCAPE.0 as i32) };
        let down = (state as u16) & 0x8000 != 0;
        let pressed = down && !self.escape_down;
        self.escape_down = down;
        pressed
    }
}

impl RenderSurface for WinOverlaySurface {
    fn draw(&mut self, command: &DrawCommand) -> Result<()> {
        match *command {
            DrawCommand::Clear(color) => self.fill_rect(0, 0, self.width, self.height, color),
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => self.fill_circle(center.x, center.y, radius as i32, color),
            DrawCommand::StrokeRect {
                origin,
                size,
                thickness,
                color,
            } => {
                let t = thickness as i32;
                let (left, top) = (origin.x, origin.y);
                let (right, bottom) = (origin.x + size.x, origin.y + size.y);
                self.fill_rect(left, top, right, top + t, color);
                self.fill_rect(left, bottom - t, right, bottom, color);
                self.fill_rect(left, top, left + t, bottom, color);
                self.fill_rect(right - t, top, right, bottom, color);
            }
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        unsafe {
            BitBlt(
                self.window_dc,
                0,
                0,
                self.width,
                self.height,
                self.buffer_dc,
                0,
                0,
                SRCCOPY,
            )?;
        }
        Ok(())
    }

    fn ticks_ms(&self) -> u64 {
        self.clock.ticks_ms()
    }

    fn wait_frame(&mut self) {
        self.pacer.wait();
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        let mut events = Vec::new();
        let mut message = MSG::default();
        unsafe {
            while PeekMessageW(&mut message, HWND(std::ptr::null_mut()), 0, 0, PM_REMOVE).into() {
                match message.message {
                    WM_QUIT => events.push(SurfaceEvent::CloseRequested),
                    WM_KEYDOWN if message.wParam.0 == VK_ESCAPE.0 as usize => {
                        events.push(SurfaceEvent::KeyPressed(Key::Escape));
                    }
                    WM_KEYDOWN => {
                        events.push(SurfaceEvent::KeyPressed(Key::Other(message.wParam.0 as u32)));
                    }
                    _ => {}
                }
                let _ = TranslateMessage(&message);
                DispatchMessageW(&message);
            }
        }
        if self.escape_pressed() {
            events.push(SurfaceEvent::KeyPressed(Key::Escape));
        }
        events
    }
}

impl OverlayWindow for WinOverlaySurface {
    fn set_click_through(&mut self, enabled: bool) -> Result<()> {
        unsafe {
            let styles = GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) as u32;
            let styles = if enabled {
                styles | WS_EX_TRANSPARENT.0
            } else {
                styles & !WS_EX_TRANSPARENT.0
            };
            SetWindowLongPtrW(self.hwnd, GWL_EXSTYLE, styles as isize);
        }
        debug!("overlay click-through -> {enabled}");
        Ok(())
    }

    fn set_always_on_top(&mut self, enabled: bool) -> Result<()> {
        let insert_after = if enabled { HWND_TOPMOST } else { HWND_NOTOPMOST };
        unsafe {
            SetWindowPos(
                self.hwnd,
                insert_after,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )?;
        }
        debug!("overlay always-on-top -> {enabled}");
        Ok(())
    }
}

impl Drop for WinOverlaySurface {
    fn drop(&mut self) {
        unsafe {
            SelectObject(self.buffer_dc, self.previous_bitmap);
            let _ = DeleteObject(HGDIOBJ(self.bitmap.0));
            let _ = DeleteDC(self.buffer_dc);
            ReleaseDC(self.hwnd, self.window_dc);
            if let Err(err) = DestroyWindow(self.hwnd) {
                warn!("DestroyWindow failed for overlay: {err}");
            }
        }
    }
}
